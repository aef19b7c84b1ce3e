use super::*;
use crate::scene::svg::parse_svg;

const DOC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <rect x="0" y="0" width="50" height="50" fill="#ff0000"/>
  <rect x="50" y="0" width="50" height="50" fill="#0000ff"/>
</svg>"##;

fn pixel(frame: &CameraFrame, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn home_camera_shows_whole_document() {
    let tree = parse_svg(DOC.as_bytes()).unwrap();
    let frame = render_camera_frame(&tree, ViewportPos::new(50.0, 25.0, 100.0), 100).unwrap();
    assert_eq!((frame.width, frame.height), (100, 50));
    assert_eq!(pixel(&frame, 10, 25), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 90, 25), [0, 0, 255, 255]);
}

#[test]
fn zoomed_camera_shows_only_its_target() {
    let tree = parse_svg(DOC.as_bytes()).unwrap();
    // Camera on the blue half, 50 units wide.
    let frame = render_camera_frame(&tree, ViewportPos::new(75.0, 25.0, 50.0), 100).unwrap();
    assert_eq!(pixel(&frame, 5, 25), [0, 0, 255, 255]);
    assert_eq!(pixel(&frame, 95, 25), [0, 0, 255, 255]);
}

#[test]
fn zero_width_frame_is_rejected() {
    let tree = parse_svg(DOC.as_bytes()).unwrap();
    assert!(render_camera_frame(&tree, ViewportPos::new(50.0, 25.0, 100.0), 0).is_err());
}
