use std::{thread, time::Duration};

use ostra_log::{
    Category, CategoryStyle, Color, PrintOpts, Settings, Timer,
    data, error, extime, global, info, log, section, status, success, warning,
};

fn load_assets(count: usize) {
    let timer = Timer::start("load assets");
    for i in 1..=count {
        thread::sleep(Duration::from_millis(20));
        global::print(
            &Category::Info,
            "progress",
            &format!("{}/{}", i, count),
            PrintOpts::new().with_overwrite_line(i < count),
            &ostra_log::call_site!(),
        ).ok();
    }
    extime!(timer);
}

fn check_config() {
    warning!("config file missing, using defaults");
    error!(title: "config", "key {} has the wrong type", "width");
}

fn main() {
    let mut settings = Settings::from_env();
    settings
        .register_status_code(200, "All systems nominal")
        .register_status_code(503, "Service unavailable")
        .register_category("net", CategoryStyle::new(Color::Magenta).with_forced(true));
    global::init_with(settings);

    info!("starting");
    data!(title: "args", "{:?}", std::env::args().skip(1).collect::<Vec<_>>());
    load_assets(5);
    check_config();
    log!(Category::from("net"), "listening on {}", "127.0.0.1:8080");
    status!(Category::Info, 200);
    status!(Category::Info, 418);

    section!("QUIET MODE");
    global::with_settings(|s| {
        s.set_verbose(false);
    });
    info!("not shown");
    success!("forced categories still print");

    let estimate = Timer::start("full run").scaled(100.0).approximate(true);
    thread::sleep(Duration::from_millis(3));
    extime!(estimate);
}
