use std::error::Error;

mod scenes;

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== SlideKit scripted session ===");
    println!("Each scene drives the kernel with synthetic gestures and prints");
    println!("where it lands. Set RUST_LOG=debug to see every phase change.");
    println!();

    scenes::coverflow_pager()?;
    scenes::looping_cards()?;
    scenes::paging_indicator()?;
    scenes::marquee()?;
    scenes::card_deck()?;
    Ok(())
}
