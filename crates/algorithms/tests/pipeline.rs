//! End-to-end pipeline: encoded image → grayscale → threshold → cleanup →
//! label → measure.

use morpho_algorithms::filters::apply_gaussian;
use morpho_algorithms::label::{label, Connectivity};
use morpho_algorithms::measure::{measure, measure_with_intensity};
use morpho_algorithms::morphology::{opening, remove_small_objects, StructuringElement};
use morpho_algorithms::threshold::{threshold_auto, GlobalMethod};
use morpho_core::color::{invert, to_grayscale};
use morpho_core::io::{read_tiff_from_buffer, write_tiff_to_buffer};
use morpho_core::{AnyGrid, Grid};

/// Two bright disks and one speck on a dark RGB background
fn synthetic_coins() -> Grid<u8> {
    let centers = [(12.0, 12.0, 6.0), (30.0, 36.0, 8.0)];
    Grid::from_shape_fn(&[48, 52, 3], |idx| {
        let (r, c) = (idx[0] as f64, idx[1] as f64);
        let inside = centers
            .iter()
            .any(|&(cr, cc, rad)| (r - cr).powi(2) + (c - cc).powi(2) <= rad * rad);
        let speck = idx[0] == 40 && idx[1] == 5;
        if inside || speck { 220 } else { 30 }
    })
    .unwrap()
}

#[test]
fn coins_pipeline() {
    let bytes = write_tiff_to_buffer(&AnyGrid::from(synthetic_coins())).unwrap();
    let loaded = read_tiff_from_buffer(&bytes).unwrap();
    let AnyGrid::U8(rgb) = loaded else {
        panic!("expected an 8-bit grid");
    };
    assert_eq!(rgb.shape(), &[48, 52, 3]);

    let gray = to_grayscale(&rgb).unwrap();
    let smooth = apply_gaussian(&gray, 0.5, 4.0).unwrap();
    let (cutoff, binary) = threshold_auto(&smooth, GlobalMethod::Otsu).unwrap();
    assert!(cutoff > 30.0 / 255.0 && cutoff < 220.0 / 255.0);

    let opened = opening(&binary, &StructuringElement::disk(2, 1).unwrap()).unwrap();
    let cleaned = remove_small_objects(&opened, 20, Connectivity::Full).unwrap();
    let labeled = label(&cleaned, Connectivity::Full).unwrap();
    assert_eq!(labeled.num_labels(), 2);

    let regions = measure(labeled.labels());
    assert!((regions[0].centroid[0] - 12.0).abs() < 0.5);
    assert!((regions[0].centroid[1] - 12.0).abs() < 0.5);
    assert!((regions[1].centroid[0] - 30.0).abs() < 0.5);
    assert!((regions[1].centroid[1] - 36.0).abs() < 0.5);
    assert!(regions[1].area > regions[0].area);

    let with_intensity = measure_with_intensity(labeled.labels(), &gray).unwrap();
    let stats = with_intensity[0].intensity.unwrap();
    assert!(stats.mean > 0.5);
}

#[test]
fn inverted_image_swaps_foreground() {
    let gray: Grid<f64> =
        Grid::from_shape_fn(&[10, 10], |idx| if idx[0] < 5 { 0.9 } else { 0.1 }).unwrap();
    let (_, bright) = threshold_auto(&gray, GlobalMethod::Otsu).unwrap();
    let (_, dark) = threshold_auto(&invert(&gray), GlobalMethod::Otsu).unwrap();
    assert_eq!(bright.count_true(), 50);
    assert!(bright.iter().zip(dark.iter()).all(|(&a, &b)| a != b));
}
