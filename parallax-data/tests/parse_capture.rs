//! End-to-end parsing of small captures written to a temporary directory.

use image::RgbImage;
use ndarray::Array4;
use ndarray_npy::write_npy;
use parallax_data::{
    CameraType, DataError, ManifestDataParser, ParserConfig, Split, camera::camera_to_world_rows,
};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WIDTH: u32 = 8;
const HEIGHT: u32 = 6;

fn pose(tx: f64, ty: f64, tz: f64) -> Value {
    json!([
        [0.0, 0.0, 1.0, tx],
        [1.0, 0.0, 0.0, ty],
        [0.0, 1.0, 0.0, tz],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Write `images/<name>.png` and its disparity map filled with `fill`.
fn write_frame(root: &Path, name: &str, fill: f32) {
    let images = root.join("images");
    fs::create_dir_all(&images).unwrap();
    RgbImage::new(WIDTH, HEIGHT)
        .save(images.join(format!("{name}.png")))
        .unwrap();
    let disparity = Array4::<f32>::from_elem((1, 1, HEIGHT as usize, WIDTH as usize), fill);
    write_npy(images.join(format!("{name}_disp.npy")), &disparity).unwrap();
}

fn base_manifest(frames: Value) -> Value {
    json!({
        "frames": frames,
        "fl_x": 50,
        "fl_y": 60,
        "cx": 4.0,
        "cy": 3.0,
        "w": WIDTH,
        "h": HEIGHT,
        "k1": 0.1,
        "k2": -0.05,
        "p1": 0.001,
        "p2": 0.002,
        "aabb_scale": 4,
    })
}

fn write_manifest(root: &Path, manifest: &Value) {
    fs::write(root.join("transforms.json"), serde_json::to_vec_pretty(manifest).unwrap()).unwrap();
}

fn parser(root: &TempDir, scene_scale: f32) -> ManifestDataParser {
    ManifestDataParser::new(
        ParserConfig::default()
            .with_data(root.path())
            .with_scene_scale(scene_scale),
    )
}

fn three_frame_capture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "0001", 1.0);
    write_frame(dir.path(), "0002", 2.0);
    write_frame(dir.path(), "0003", 3.0);
    write_manifest(
        dir.path(),
        &base_manifest(json!([
            { "file_path": "images/0001.png", "transform_matrix": pose(1.0, 2.0, 3.0) },
            { "file_path": "", "transform_matrix": pose(9.0, 9.0, 9.0) },
            { "file_path": "images/0002.png", "transform_matrix": pose(-1.0, 0.5, 0.0) },
            { "file_path": "images/0003.png", "transform_matrix": pose(0.0, 0.0, -4.0) },
        ])),
    );
    dir
}

#[test]
fn test_retained_frames_share_one_index() {
    let dir = three_frame_capture();
    let dataset = parser(&dir, 1.0).parse(Split::Train).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.cameras.len(), 3);
    assert_eq!(dataset.depths.len(), 3);

    let expected = ["0001", "0002", "0003"];
    for (i, name) in expected.iter().enumerate() {
        assert_eq!(
            dataset.image_filenames[i],
            dir.path().join("images").join(format!("{name}.png"))
        );
        let inputs = dataset.sample_inputs(i).unwrap();
        assert_eq!(inputs.depth.dim(), (HEIGHT as usize, WIDTH as usize));
        assert!(inputs.depth.iter().all(|&v| v == (i + 1) as f32));
    }
    assert!(dataset.sample_inputs(3).is_none());
}

#[test]
fn test_camera_assembly() {
    let dir = three_frame_capture();
    let dataset = parser(&dir, 1.0).parse(Split::Val).unwrap();
    let cameras = &dataset.cameras;

    assert_eq!((cameras.fx, cameras.fy), (50.0, 60.0));
    assert_eq!((cameras.cx, cameras.cy), (4.0, 3.0));
    assert_eq!((cameras.width, cameras.height), (WIDTH, HEIGHT));
    assert_eq!(cameras.camera_type, CameraType::Perspective);
    assert_eq!(cameras.distortion.to_array(), [0.1, -0.05, 0.0, 0.0, 0.001, 0.002]);

    assert_eq!(dataset.scene_box.min.to_array(), [-4.0, -4.0, -4.0]);
    assert_eq!(dataset.scene_box.max.to_array(), [4.0, 4.0, 4.0]);
}

#[test]
fn test_scene_scale_only_touches_translation() {
    let dir = three_frame_capture();
    let unit = parser(&dir, 1.0).parse(Split::Train).unwrap();
    let scaled = parser(&dir, 0.5).parse(Split::Train).unwrap();

    for i in 0..unit.len() {
        let a = camera_to_world_rows(unit.cameras.camera_to_world(i).unwrap());
        let b = camera_to_world_rows(scaled.cameras.camera_to_world(i).unwrap());
        for row in 0..3 {
            assert_eq!(a[row][..3], b[row][..3]);
            assert!((a[row][3] * 0.5 - b[row][3]).abs() < 1e-6);
        }
    }

    let first = camera_to_world_rows(unit.cameras.camera_to_world(0).unwrap());
    assert_eq!(first, [[0.0, 0.0, 1.0, 1.0], [1.0, 0.0, 0.0, 2.0], [0.0, 1.0, 0.0, 3.0]]);
}

#[test]
fn test_every_frame_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        &base_manifest(json!([
            { "file_path": "", "transform_matrix": pose(0.0, 0.0, 0.0) },
            { "file_path": "", "transform_matrix": pose(0.0, 0.0, 0.0) },
            { "file_path": "", "transform_matrix": pose(0.0, 0.0, 0.0) },
        ])),
    );

    let err = parser(&dir, 1.0).parse(Split::Train).unwrap_err();
    assert!(matches!(err, DataError::DatasetEmpty { skipped: 3 }));
}

#[test]
fn test_focal_fields_missing() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "0001", 1.0);
    let mut manifest = base_manifest(json!([
        { "file_path": "images/0001.png", "transform_matrix": pose(0.0, 0.0, 0.0) },
    ]));
    let fields = manifest.as_object_mut().unwrap();
    fields.remove("fl_x");
    fields.remove("fl_y");
    write_manifest(dir.path(), &manifest);

    let err = parser(&dir, 1.0).parse(Split::Train).unwrap_err();
    assert!(matches!(err, DataError::FocalLengthUnavailable));
}

#[test]
fn test_camera_angle_fallback() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "0001", 1.0);
    let mut manifest = base_manifest(json!([
        { "file_path": "images/0001.png", "transform_matrix": pose(0.0, 0.0, 0.0) },
    ]));
    let fields = manifest.as_object_mut().unwrap();
    fields.remove("fl_x");
    fields.insert("camera_angle_x".into(), json!(1.0));
    write_manifest(dir.path(), &manifest);

    let dataset = parser(&dir, 1.0).parse(Split::Train).unwrap();
    let expected = 0.5 * WIDTH as f64 / 0.5_f64.tan();
    assert!((dataset.cameras.fx as f64 - expected).abs() < 1e-4);
    assert_eq!(dataset.cameras.fy, 60.0);
}

#[test]
fn test_missing_distortion_field() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "0001", 1.0);
    let mut manifest = base_manifest(json!([
        { "file_path": "images/0001.png", "transform_matrix": pose(0.0, 0.0, 0.0) },
    ]));
    manifest.as_object_mut().unwrap().remove("p2");
    write_manifest(dir.path(), &manifest);

    let err = parser(&dir, 1.0).parse(Split::Train).unwrap_err();
    assert!(matches!(err, DataError::MissingField(f) if f == "p2"));
}

#[test]
fn test_missing_image_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "0001", 1.0);
    fs::remove_file(dir.path().join("images/0001.png")).unwrap();
    write_manifest(
        dir.path(),
        &base_manifest(json!([
            { "file_path": "images/0001.png", "transform_matrix": pose(0.0, 0.0, 0.0) },
        ])),
    );

    let err = parser(&dir, 1.0).parse(Split::Train).unwrap_err();
    assert!(matches!(err, DataError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));

    // Without probing the image is never opened.
    let unprobed = ManifestDataParser::new(
        ParserConfig::default()
            .with_data(dir.path())
            .with_probe_images(false),
    );
    assert_eq!(unprobed.parse(Split::Train).unwrap().len(), 1);
}

#[test]
fn test_manifest_size_wins_over_image_size() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "0001", 1.0);
    RgbImage::new(3, 2)
        .save(dir.path().join("images/0001.png"))
        .unwrap();
    write_manifest(
        dir.path(),
        &base_manifest(json!([
            { "file_path": "images/0001.png", "transform_matrix": pose(1.0, 1.0, 1.0) },
        ])),
    );

    let dataset = parser(&dir, 0.33).parse(Split::Train).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(
        (dataset.cameras.width, dataset.cameras.height),
        (WIDTH, HEIGHT)
    );
    assert_eq!(
        dataset.depth(0).unwrap().dim(),
        (HEIGHT as usize, WIDTH as usize)
    );
}

#[test]
fn test_missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let err = parser(&dir, 1.0).parse(Split::Train).unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}
