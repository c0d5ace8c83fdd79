use slog::{o, Discard, Drain, Logger};

pub use slog_async::Async;
pub use slog_term::{CompactFormat, TermDecorator};

/// Terminal logger with compact formatting and an async drain.
///
/// Every record carries the `service` key with the given prefix.
pub fn new_logger(prefix: &str) -> Logger {
    let decorator = TermDecorator::new().build();
    let drain = CompactFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!("service" => prefix.to_owned()))
}

/// Logger for tests, drops everything.
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}
