use super::*;
use image::{GrayImage, Luma, Rgb, RgbImage};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn write_gray_png(path: &Path, width: u32, height: u32) {
    GrayImage::from_fn(width, height, |x, y| Luma([(x + 10 * y) as u8]))
        .save(path)
        .unwrap();
}

#[test]
fn test_declines_foreign_extensions() {
    let plugin = ImageReaderPlugin::new();
    assert!(plugin.get_reader(&"/tmp/a.tif".into()).unwrap().is_none());
    assert!(plugin
        .get_reader(&vec!["/tmp/a.png", "/tmp/b.csv"].into())
        .unwrap()
        .is_none());
    assert!(plugin
        .get_reader(&ReaderPath::many(Vec::<String>::new()))
        .unwrap()
        .is_none());
}

#[test]
fn test_declines_mismatching_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fake.png");
    fs::write(&path, "definitely not a png").unwrap();

    let plugin = ImageReaderPlugin::new();
    assert!(plugin.get_reader(&path.as_path().into()).unwrap().is_none());
}

#[test]
fn test_missing_file_is_claimed_and_fails_on_load() {
    let dir = tempdir().unwrap();
    let path: ReaderPath = dir.path().join("later.png").into();

    let loader = ImageReaderPlugin::new().get_reader(&path).unwrap().unwrap();
    assert!(matches!(loader(&path), Err(ReadError::Io { .. })));
}

#[test]
fn test_gray_png_is_two_dimensional() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("gray.png");
    write_gray_png(&file, 3, 2);
    let path = ReaderPath::single(path_str(&file));

    let loader = ImageReaderPlugin::new().get_reader(&path).unwrap().unwrap();
    let layers = loader(&path).unwrap();

    assert_eq!(layers.len(), 1);
    let layer = &layers[0];
    assert_eq!(layer.kind, LayerKind::Image);
    assert_eq!(layer.data.shape(), &[2, 3]);
    assert_eq!(layer.data.get(&[1, 2]), Some(12.0));
    assert_eq!(layer.metadata.get("rgb"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn test_rgb_png_has_channel_axis() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("color.png");
    RgbImage::from_pixel(4, 2, Rgb([255, 128, 0])).save(&file).unwrap();
    let path = ReaderPath::from(file.as_path());

    let loader = ImageReaderPlugin::new().get_reader(&path).unwrap().unwrap();
    let layers = loader(&path).unwrap();

    assert_eq!(layers[0].data.shape(), &[2, 4, 3]);
    assert_eq!(layers[0].data.get(&[0, 0, 1]), Some(128.0));
    assert_eq!(layers[0].metadata.get("rgb"), Some(&serde_json::Value::Bool(true)));
}

#[test]
fn test_binary_pgm() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plane.pgm");
    let mut bytes = b"P5\n2 2\n255\n".to_vec();
    bytes.extend_from_slice(&[0, 64, 128, 255]);
    fs::write(&file, bytes).unwrap();
    let path = ReaderPath::from(file.as_path());

    let loader = ImageReaderPlugin::new().get_reader(&path).unwrap().unwrap();
    let layers = loader(&path).unwrap();
    assert_eq!(layers[0].data.shape(), &[2, 2]);
    assert_eq!(layers[0].data.values(), &[0.0, 64.0, 128.0, 255.0]);
}

#[test]
fn test_list_is_stacked_along_new_axis() {
    let dir = tempdir().unwrap();
    let files: Vec<_> = (0..3).map(|i| dir.path().join(format!("z{}.png", i))).collect();
    for file in &files {
        write_gray_png(file, 5, 4);
    }
    let path = ReaderPath::from(files.clone());

    let loader = ImageReaderPlugin::new().get_reader(&path).unwrap().unwrap();
    let layers = loader(&path).unwrap();

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].data.shape(), &[3, 4, 5]);
    assert_eq!(layers[0].metadata.get("rgb"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn test_stack_with_mismatched_planes_fails() {
    let dir = tempdir().unwrap();
    let small = dir.path().join("small.png");
    let large = dir.path().join("large.png");
    write_gray_png(&small, 2, 2);
    write_gray_png(&large, 3, 3);
    let path = ReaderPath::from(vec![small, large.clone()]);

    let loader = ImageReaderPlugin::new().get_reader(&path).unwrap().unwrap();
    match loader(&path) {
        Err(ReadError::ShapeMismatch {
            path: bad,
            expected,
            found,
        }) => {
            assert_eq!(bad, path_str(&large));
            assert_eq!(expected, vec![2, 2]);
            assert_eq!(found, vec![3, 3]);
        }
        other => panic!("expected a shape mismatch, got {:?}", other.map(|l| l.len())),
    }
}

#[test]
fn test_plugin_identity() {
    let plugin = ImageReaderPlugin::new();
    assert_eq!(plugin.name(), PLUGIN_NAME);
    assert_eq!(plugin.priority(), PluginPriority::Fallback(200));
    assert_eq!(plugin.compatible_api_versions().len(), 1);
    assert!(plugin.file_extensions().contains(&"pgm".to_string()));
}

#[test]
fn test_claims_existing_file_with_hash_in_name() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("run#3.png");
    write_gray_png(&file, 3, 2);
    let path = ReaderPath::single(path_str(&file));

    let loader = ImageReaderPlugin::new()
        .get_reader(&path)
        .unwrap()
        .expect("png with '#' in its name is claimed");
    assert_eq!(loader(&path).unwrap()[0].data.shape(), &[2, 3]);
}
