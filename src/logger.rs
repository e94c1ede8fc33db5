use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};

use crate::image::describe::HeaderReport;
use crate::image::Bitmap;

const CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    // no config file next to the working directory, log warnings to the console
    let console = ConsoleAppender::builder().build();
    if let Ok(config) = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(Root::builder().appender("console").build(LevelFilter::Warn))
    {
        let _ = log4rs::init_config(config);
    }
}

pub fn log_bitmap_header(bitmap: &Bitmap) {
    for line in HeaderReport::new(bitmap).to_string().lines() {
        log::info!("{}", line);
    }
}
