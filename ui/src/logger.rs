/// Installs a logger appropriate for the platform. Safe to call more than once; only the first
/// call has any effect.
pub fn setup() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }

    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    {
        console_error_panic_hook::set_once();
        if log::set_logger(&console::CONSOLE_LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

    /// Forwards to the browser's developer console
    pub struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = JsValue::from_str(&format!("{} -- {}", record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }
}
