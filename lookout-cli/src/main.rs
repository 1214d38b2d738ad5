use std::{
    env,
    io::{self, BufRead},
    process,
    sync::Arc,
    thread,
};

use env_logger::{Builder, Env};
use lookout_core::{
    data::{Config, ErrorSurface, Route},
    error::Error,
    runtime::{Dispatcher, Executor, Pool, Sink},
    webapi::WebApi,
    Dashboard,
};

const ENV_LOG: &str = "LOOKOUT_LOG";
const ENV_LOG_STYLE: &str = "LOOKOUT_LOG_STYLE";

const WEBAPI_THREADS: usize = 4;

fn main() {
    // Setup logging from the env variables, with defaults.
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let args: Vec<String> = env::args().collect();
    let config = load_config(args.get(1));
    let start_path = args.get(2).unwrap_or(&config.start_path).clone();

    if let Err(err) = start(config, &start_path) {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn load_config(server_url: Option<&String>) -> Config {
    let mut config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!("no config file found, saving defaults");
            let config = Config::default();
            if let Err(err) = config.save() {
                log::warn!("failed to save config: {}", err);
            }
            config
        }
        Err(err) => {
            log::warn!("failed to read config: {}", err);
            Config::default()
        }
    }
    .with_env();
    if let Some(url) = server_url {
        config.server_url = url.clone();
    }
    config
}

fn start(config: Config, start_path: &str) -> Result<(), Error> {
    let api = Arc::new(WebApi::new(&config.server_url, Config::proxy().as_deref())?);
    log::info!("using server {}", api.base());

    let executor: Arc<dyn Executor> = Arc::new(Pool::new("webapi", WEBAPI_THREADS));
    let dispatcher = Dispatcher::new();
    let mut dashboard = Dashboard::new(&config, api, executor, dispatcher.sink());

    let _input_thread = thread::Builder::new().name("input".into()).spawn({
        let sink = dispatcher.sink();
        move || read_commands(sink)
    })?;

    dashboard.activate(Route::parse(start_path));
    dispatcher.run(&mut dashboard);
    dashboard.teardown();
    Ok(())
}

fn read_commands(sink: Sink<Dashboard>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let mut words = line.split_whitespace();
        let submitted = match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("go"), Some(path)) => {
                let route = Route::parse(path);
                sink.submit(move |d: &mut Dashboard| d.navigate(route))
            }
            (Some("camera"), Some(id)) => {
                let id = id.to_string();
                sink.submit(move |d: &mut Dashboard| d.select_camera(&id))
            }
            (Some("back"), _) => sink.submit(|d: &mut Dashboard| d.back()),
            (Some("page"), Some(page)) => match page.parse::<usize>() {
                Ok(page) => sink.submit(move |d: &mut Dashboard| d.gallery_page(page)),
                Err(_) => {
                    println!("not a page number: {}", page);
                    continue;
                }
            },
            (Some("next"), _) => sink.submit(|d: &mut Dashboard| d.gallery_next()),
            (Some("prev"), _) => sink.submit(|d: &mut Dashboard| d.gallery_previous()),
            (Some("pin"), _) => sink.submit(|d: &mut Dashboard| d.pin_image()),
            (Some("save"), _) => sink.submit(|d: &mut Dashboard| d.save_image()),
            (Some("set"), Some(field)) => {
                let field = field.to_string();
                let value = words.collect::<Vec<_>>().join(" ");
                sink.submit(move |d: &mut Dashboard| set_field(d, &field, value))
            }
            (Some("submit"), _) => sink.submit(|d: &mut Dashboard| d.submit_settings()),
            (Some("cancel"), _) => sink.submit(|d: &mut Dashboard| d.cancel_settings()),
            (Some("dismiss"), _) => sink.submit(|d: &mut Dashboard| d.dismiss_errors()),
            (Some("status"), _) => sink.submit(|d: &mut Dashboard| print_status(d)),
            (Some("quit"), _) => break,
            (Some(command), _) => {
                println!("unknown command: {}", command);
                continue;
            }
        };
        if submitted.is_err() {
            return;
        }
    }
    if sink.quit().is_err() {
        log::debug!("dispatcher already gone");
    }
}

fn set_field(d: &mut Dashboard, field: &str, value: String) {
    let form = &mut d.settings.form;
    match field {
        "name" => form.service_name = value,
        "limit" => form.client_limit = value,
        "duration" => form.cert_duration = value,
        "domains" => form.whitelisted_domains = value,
        _ => println!("unknown settings field: {}", field),
    }
}

fn print_error(scope: &str, errors: &ErrorSurface) {
    if let Some(error) = errors.current() {
        let kind = if error.recoverable { "dismissable" } else { "fatal" };
        println!(
            "  {} error ({}, {}): {} {}",
            scope, error.status, kind, error.message, error.extra
        );
    }
}

fn print_status(d: &Dashboard) {
    let store = &d.store;
    println!("{} at {}", store.service_name(), d.history.current().title());
    for camera in store.cameras().iter() {
        let marker = if camera.id == store.current_camera().id { "*" } else { " " };
        println!(
            " {} {} [{}] {} {}{}",
            marker,
            camera.name,
            camera.id,
            camera.local_time,
            if camera.offline { "offline" } else { "" },
            if camera.sleeping { "sleeping" } else { "" },
        );
    }
    if d.refresh.waiting.is_waiting() {
        println!("  refreshing...");
    }
    print_error("refresh", &d.errors);

    if d.gallery.is_active() {
        println!(
            "  {} of {}: page {} of {}, {} result(s)",
            d.gallery.label(),
            d.gallery.camera(),
            d.gallery.cursor.current,
            d.gallery.pages(),
            d.gallery.results(),
        );
        for image in d.gallery.image_list() {
            println!("    {}", image.image_uri(store.default_image()));
        }
        print_error("gallery", &d.gallery.error);
    }

    if let Some(meta) = d.lightbox.meta.resolved() {
        println!(
            "  {} {} {}{}",
            meta.image_uri(store.default_image()),
            meta.date.as_deref().unwrap_or(""),
            meta.time.as_deref().unwrap_or(""),
            if meta.is_pinned == Some(true) { " (pinned)" } else { "" },
        );
        if let Some(video) = meta.video_uri(store.default_image()) {
            println!("  video: {}", video);
        }
    }
    print_error("image", &d.lightbox.error);

    if d.settings.is_active() {
        let form = &d.settings.form;
        println!(
            "  settings: name={:?} limit={:?} duration={:?} domains={:?}",
            form.service_name, form.client_limit, form.cert_duration, form.whitelisted_domains
        );
    }
    print_error("settings", &d.settings.error);
}
