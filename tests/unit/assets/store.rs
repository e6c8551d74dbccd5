use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn inserted_sprites_are_shared() {
    let mut store = AssetStore::new("does-not-exist");
    let a = store
        .insert("star.png", SpriteAsset::solid_rgb(2, 2, [1, 2, 3]).unwrap())
        .unwrap();
    let b = store.load_sprite("./star.png").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(store.len(), 1);
}

#[test]
fn missing_file_is_asset_error() {
    let mut store = AssetStore::new("does-not-exist");
    let err = store.load_sprite("nope.png").unwrap_err();
    assert!(matches!(err, BabycamError::Asset(_)));
    assert!(err.is_fatal());
}

#[test]
fn loads_png_from_disk_once() {
    let dir = PathBuf::from("target").join("unit_asset_store");
    std::fs::create_dir_all(&dir).unwrap();
    let img = image::RgbaImage::from_raw(3, 2, vec![7u8; 3 * 2 * 4]).unwrap();
    img.save_with_format(dir.join("dot.png"), image::ImageFormat::Png)
        .unwrap();

    let mut store = AssetStore::new(&dir);
    let a = store.load_sprite("dot.png").unwrap();
    let b = store.load_sprite("dot.png").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!((a.width(), a.height()), (3, 2));
    assert!(a.has_alpha());
}

#[test]
fn fonts_are_read_once_and_shared() {
    let dir = PathBuf::from("target").join("unit_asset_store_fonts");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("caption.ttf"), [0u8, 1, 0, 0]).unwrap();

    let mut store = AssetStore::new(&dir);
    let a = store.load_font("caption.ttf").unwrap();
    let b = store.load_font("./caption.ttf").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.as_slice(), &[0, 1, 0, 0]);
    assert!(store.is_empty());
}

#[test]
fn missing_or_empty_font_is_asset_error() {
    let dir = PathBuf::from("target").join("unit_asset_store_empty_font");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("empty.ttf"), []).unwrap();

    let mut store = AssetStore::new(&dir);
    assert!(matches!(store.load_font("nope.ttf"), Err(BabycamError::Asset(_))));
    assert!(matches!(store.load_font("empty.ttf"), Err(BabycamError::Asset(_))));

    let inserted = store.insert_font("mem.ttf", vec![9]).unwrap();
    assert!(Arc::ptr_eq(&inserted, &store.load_font("mem.ttf").unwrap()));
}
