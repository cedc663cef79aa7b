use super::*;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    image::RgbImage::new(width, height).save(dir.join(name)).expect("write png");
}

#[tokio::test]
async fn reads_natural_size_from_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_png(dir.path(), "lobby.png", 16, 4);
    let loader = FsAssetLoader::new(dir.path());
    let size = loader.load("lobby.png").await.expect("size");
    assert_eq!(size, ImageSize { width: 16, height: 4 });
}

#[tokio::test]
async fn leading_slash_resolves_under_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("img")).expect("mkdir");
    write_png(&dir.path().join("img"), "hall.png", 8, 2);
    let loader = FsAssetLoader::new(dir.path());
    let size = loader.load("/img/hall.png").await.expect("size");
    assert_eq!(size, ImageSize { width: 8, height: 2 });
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loader = FsAssetLoader::new(dir.path());
    let err = loader.load("nope.png").await.expect_err("should fail");
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[tokio::test]
async fn directory_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("lobby.jpg")).expect("mkdir");
    let loader = FsAssetLoader::new(dir.path());
    let err = loader.load("lobby.jpg").await.expect_err("should fail");
    assert!(matches!(err, LoadError::NotFound(path) if path.ends_with("lobby.jpg")));
}

#[tokio::test]
async fn garbage_file_is_an_image_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("broken.png"), b"not a png").expect("write");
    let loader = FsAssetLoader::new(dir.path());
    let err = loader.load("broken.png").await.expect_err("should fail");
    assert!(matches!(err, LoadError::Image(_)));
}

#[test]
fn resolve_rejects_schemes_and_parent_dirs() {
    let loader = FsAssetLoader::new("/srv/tour");
    assert!(matches!(loader.resolve("https://cdn.example/a.jpg"), Err(LoadError::UnsupportedUrl(_))));
    assert!(matches!(loader.resolve("../secret.jpg"), Err(LoadError::OutsideRoot(_))));
    assert!(matches!(loader.resolve("img/../../x.jpg"), Err(LoadError::OutsideRoot(_))));
    assert_eq!(loader.resolve("img/a.jpg").expect("path"), PathBuf::from("/srv/tour/img/a.jpg"));
    assert_eq!(loader.root(), Path::new("/srv/tour"));
}
