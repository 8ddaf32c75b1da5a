/// GridMask command shell entry point
fn main() {
    use std::path::PathBuf;

    use gridmask::Session;
    use gridmask::config::AppConfig;

    let mut config = AppConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    log::info!("🚀 GridMask starting with {}px cells", config.preferences.cell_size);

    let mut session = Session::new().with_cell_size(config.preferences.cell_size);

    if let Some(arg) = std::env::args_os().nth(1) {
        let path = PathBuf::from(arg);
        let result = if path.is_dir() {
            session.open_directory(&path).map(|_| ())
        } else {
            session.open_file(&path)
        };
        if let Err(e) = result {
            eprintln!("error: {}", e);
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = gridmask::shell::run(&mut session, stdin.lock(), stdout.lock()) {
        eprintln!("Shell error: {}", e);
    }

    if session.is_dirty() {
        log::info!("Saving unsaved selection before exit");
    }
    if let Err(e) = session.save_selection_file() {
        eprintln!("error: {}", e);
    }

    config.preferences.cell_size = session.cell_size();
    if !session.images().is_empty() {
        config.preferences.last_directory = Some(session.project().folder.clone());
    }
    if let Err(e) = config.save_to_default_path() {
        log::warn!("Failed to save configuration: {}", e);
    }
}
