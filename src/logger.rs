use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};

#[ctor::ctor]
fn init() {
    if log4rs::init_file("log4rs.yaml", Default::default()).is_ok() {
        return;
    }
    // No config file in the working directory, fall back to plain console
    // output so library consumers and tests still get log lines.
    let stdout = ConsoleAppender::builder().build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .expect("console fallback configuration must be valid");
    let _ = log4rs::init_config(config);
}
