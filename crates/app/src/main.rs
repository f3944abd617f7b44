//! Paperwall - Main Entry Point
//!
//! A small CLI front end over the data layer. `paperwall [mkt]` shows
//! today's image for the resolved region; `paperwall list [mkt]` pages
//! through the stored archive. Both go through the same query primitives a
//! UI surface would observe.

use std::sync::Arc;

use paperwall_application::ports::{Navigator, UnauthorizedHandler};
use paperwall_application::{
    ApiConfig, ApiService, AuthSession, FetchFuture, HolidayService, ImageListQuery,
    PaginationMode, RegionRegistry, ResourceQuery,
};
use paperwall_domain::{ImageFormat, ImageMeta, ImageVariant};
use paperwall_infrastructure::{FileStore, ReqwestTransport, SystemClock, SystemLocaleSource};

/// Navigator for a CLI process: there is no admin surface to redirect, so a
/// forced login round only surfaces as a log line.
#[derive(Debug, Clone, Copy, Default)]
struct CliNavigator;

impl Navigator for CliNavigator {
    fn current_path(&self) -> String {
        "/".to_string()
    }

    fn navigate_to(&self, path: &str) {
        tracing::info!(path, "navigation requested");
    }
}

fn print_meta(meta: &ImageMeta) {
    if let Some(date) = &meta.date {
        println!("date:      {date}");
    }
    if let Some(title) = &meta.title {
        println!("title:     {title}");
    }
    if let Some(copyright) = &meta.copyright {
        println!("copyright: {copyright}");
    }
}

async fn show_today(
    api: &Arc<ApiService<ReqwestTransport>>,
    transport: Arc<ReqwestTransport>,
    mkt: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = ResourceQuery::new(mkt.clone(), {
        let api = Arc::clone(api);
        move |mkt: String| -> FetchFuture<ImageMeta> {
            let api = Arc::clone(&api);
            Box::pin(async move { api.today_image(Some(&mkt)).await })
        }
    });
    query.refetch().await;

    let snapshot = query.snapshot().await;
    if let Some(error) = snapshot.error {
        return Err(error.into());
    }
    println!("region:    {mkt}");
    if let Some(meta) = &snapshot.value {
        print_meta(meta);
    }
    println!(
        "download:  {}",
        api.today_image_url(ImageVariant::Uhd, ImageFormat::Jpg)
    );

    let holidays = HolidayService::new(transport);
    if let Some(day) = holidays.holiday_on(chrono::Utc::now().date_naive()).await {
        println!("holiday:   {}", day.name);
    }
    Ok(())
}

async fn list_archive(
    api: &Arc<ApiService<ReqwestTransport>>,
    mkt: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = ImageListQuery::new(PaginationMode::OffsetLimit, 10, {
        let api = Arc::clone(api);
        move |params| -> FetchFuture<Vec<ImageMeta>> {
            let api = Arc::clone(&api);
            Box::pin(async move { api.images(&params).await })
        }
    });
    query.filter_by_region(Some(mkt)).await;

    let snapshot = query.snapshot().await;
    if let Some(error) = snapshot.error {
        return Err(error.into());
    }
    for meta in &snapshot.items {
        println!(
            "{}  {}",
            meta.date.as_deref().unwrap_or("????-??-??"),
            meta.title.as_deref().unwrap_or("(untitled)")
        );
    }
    if snapshot.has_more {
        println!("... more available");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ApiConfig::from_env();
    let transport = Arc::new(ReqwestTransport::new(&config)?);
    let storage = FileStore::default_location()?;

    let session = Arc::new(AuthSession::new(
        Arc::clone(&transport),
        storage.clone(),
        CliNavigator,
        SystemClock::new(),
    ));
    session.restore().await;
    let handler: Arc<dyn UnauthorizedHandler> = Arc::clone(&session) as Arc<dyn UnauthorizedHandler>;
    transport.set_unauthorized_handler(handler).await;

    let regions = RegionRegistry::new(storage, SystemLocaleSource::new());

    let mut args = std::env::args().skip(1);
    let (command, override_mkt) = match args.next() {
        Some(arg) if arg == "list" => ("list", args.next()),
        other => ("today", other),
    };
    let mkt = regions.resolve(override_mkt.as_deref()).await;

    let api = Arc::new(ApiService::new(Arc::clone(&transport), config));
    match command {
        "list" => list_archive(&api, mkt).await,
        _ => show_today(&api, transport, mkt).await,
    }
}
