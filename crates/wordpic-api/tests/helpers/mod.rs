#![allow(dead_code)]

use axum_test::TestServer;
use std::io::Cursor;
use std::sync::Arc;
use wordpic_api::setup::routes::setup_routes;
use wordpic_api::state::AppState;
use wordpic_core::Config;
use wordpic_records::InMemoryRecordStore;
use wordpic_storage::InMemoryStorage;

/// Router plus handles on the in-memory backends for assertions.
pub struct TestApp {
    pub server: TestServer,
    pub original_storage: Arc<InMemoryStorage>,
    pub compressed_storage: Arc<InMemoryStorage>,
    pub records: Arc<InMemoryRecordStore>,
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        aws_region: "us-east-2".to_string(),
        s3_endpoint: None,
        dynamodb_endpoint: None,
        original_bucket: "originals-test".to_string(),
        compressed_bucket: "compressed-test".to_string(),
        word_table: "Word-Image".to_string(),
        compressed_word_table: "compressed-image-word".to_string(),
        resize_width: None,
        resize_height: None,
        max_file_size_bytes: 10 * 1024 * 1024,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config())
}

pub fn setup_test_app_with(config: Config) -> TestApp {
    let original_storage = Arc::new(InMemoryStorage::new(config.original_bucket.clone()));
    let compressed_storage = Arc::new(InMemoryStorage::new(config.compressed_bucket.clone()));
    let records = Arc::new(InMemoryRecordStore::new());

    let state = Arc::new(AppState::new(
        &config,
        original_storage.clone(),
        compressed_storage.clone(),
        records.clone(),
    ));
    let router = setup_routes(&config, state).expect("build router");
    let server = TestServer::new(router).expect("build test server");

    TestApp {
        server,
        original_storage,
        compressed_storage,
        records,
    }
}

/// A valid PNG payload generated in memory.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, image::ImageFormat::Png)
}

/// A valid JPEG payload generated in memory.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, image::ImageFormat::Jpeg)
}

fn encoded_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 31 % 256) as u8, (y * 17 % 256) as u8, 96])
    }));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode test image");
    buffer
}
