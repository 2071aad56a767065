use panelcraft_core::{DraggingInfo, MotifSpec, Plate, SocketDirection, SocketGroup, SocketRules};
use panelcraft_layout::{RowLayout, SocketBoard, SurfaceBox, compute_layout};
use panelcraft_render::{
    Motif, MotifState, Pixmap, RasterFormat, RasterImage, RenderError, RenderOptions, Scene,
    render_pixmap, render_to,
};

/// A `w`×`h` image whose left half is black and right half white.
fn split_image(w: u32, h: u32) -> RasterImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..h {
        for x in 0..w {
            let v = if x < w / 2 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RasterImage::from_rgba8(w, h, data).unwrap()
}

fn solid_image(rgba: [u8; 4]) -> RasterImage {
    RasterImage::from_rgba8(4, 4, rgba.repeat(16)).unwrap()
}

fn rgb(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
    let px = pixmap.pixel(x, y).unwrap();
    (px.red(), px.green(), px.blue())
}

/// Pattern sampling may round a channel by one step.
fn assert_rgb_near(actual: (u8, u8, u8), expected: (u8, u8, u8)) {
    let diff = |a: u8, b: u8| (i16::from(a) - i16::from(b)).abs();
    assert!(
        diff(actual.0, expected.0) <= 2 && diff(actual.1, expected.1) <= 2 && diff(actual.2, expected.2) <= 2,
        "expected ~{expected:?}, got {actual:?}"
    );
}

/// One 200×50 cm plate at 2 px per cm.
fn wide_layout() -> RowLayout {
    compute_layout(&[Plate::new("p", 200.0, 50.0)], 1.0, SurfaceBox::new(400.0, 100.0)).unwrap()
}

fn render(layout: &RowLayout, board: &SocketBoard, motif: &MotifState) -> Option<Pixmap> {
    let rules = SocketRules::default();
    let scene = Scene {
        layout: Some(layout),
        board,
        dragging: None,
        rules: &rules,
        motif,
        socket_icon: None,
    };
    render_pixmap(&scene, &RenderOptions::default()).unwrap()
}

#[test]
fn pending_motif_or_missing_layout_renders_nothing() {
    let layout = wide_layout();
    let board = SocketBoard::default();
    assert!(render(&layout, &board, &MotifState::Pending).is_none());

    let rules = SocketRules::default();
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(100.0, 50.0), solid_image([0, 0, 0, 255])));
    let scene = Scene {
        layout: None,
        board: &board,
        dragging: None,
        rules: &rules,
        motif: &motif,
        socket_icon: None,
    };
    assert!(render_pixmap(&scene, &RenderOptions::default()).unwrap().is_none());
}

#[test]
fn neighbouring_tiles_meet_on_mirrored_edges() {
    let layout = wide_layout();
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(100.0, 50.0), split_image(20, 10)));
    let pixmap = render(&layout, &SocketBoard::default(), &motif).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (400, 100));

    // tile 0 runs black → white, tile 1 (mirrored) white → black
    assert!(rgb(&pixmap, 10, 50).0 < 40);
    assert!(rgb(&pixmap, 190, 50).0 > 215);
    assert!(rgb(&pixmap, 210, 50).0 > 215);
    assert!(rgb(&pixmap, 390, 50).0 < 40);
}

#[test]
fn gap_between_plates_shows_background() {
    let plates = [Plate::new("a", 100.0, 50.0), Plate::new("b", 100.0, 50.0)];
    // 20 px per cm, so the 1 cm spacing is 20 px wide
    let layout = compute_layout(&plates, 1.0, SurfaceBox::new(4020.0, 1000.0)).unwrap();
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(300.0, 128.0), solid_image([0, 0, 255, 255])));
    let pixmap = render(&layout, &SocketBoard::default(), &motif).unwrap();

    assert_rgb_near(rgb(&pixmap, 1000, 500), (0, 0, 255));
    assert_eq!(rgb(&pixmap, 2010, 500), (255, 255, 255));
    assert_rgb_near(rgb(&pixmap, 3000, 500), (0, 0, 255));
}

#[test]
fn sockets_and_drag_marker_are_drawn_on_top() {
    let layout = wide_layout();
    let rules = SocketRules::default();
    let group = SocketGroup::new("g", "p", 20.0, 20.0, 1, SocketDirection::Horizontal);
    let board = SocketBoard::new(true, vec![group.clone()]);
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(300.0, 128.0), solid_image([255, 255, 255, 255])));

    // socket centre: (23.5, 23.5) cm → (47, 53) px
    let pixmap = render(&layout, &board, &motif).unwrap();
    let (r, g, b) = rgb(&pixmap, 47, 53);
    assert!(r < 230 && g < 230 && b < 230, "socket fill expected, got {r},{g},{b}");

    let hidden = SocketBoard::new(false, vec![group.clone()]);
    let pixmap = render(&layout, &hidden, &motif).unwrap();
    assert_rgb_near(rgb(&pixmap, 47, 53), (255, 255, 255));

    let dragging = DraggingInfo {
        group_id: "g".into(),
        x_cm: 20.0,
        y_cm: 20.0,
        screen_offset_x: 0.0,
        screen_offset_y: 0.0,
    };
    let scene = Scene {
        layout: Some(&layout),
        board: &board,
        dragging: Some(&dragging),
        rules: &rules,
        motif: &motif,
        socket_icon: None,
    };
    let pixmap = render_pixmap(&scene, &RenderOptions::default()).unwrap().unwrap();
    assert_eq!(rgb(&pixmap, 47, 53), (255, 0, 0));
}

#[test]
fn socket_icon_replaces_the_circle() {
    let layout = wide_layout();
    let rules = SocketRules::default();
    let board = SocketBoard::new(
        true,
        vec![SocketGroup::new("g", "p", 20.0, 20.0, 1, SocketDirection::Horizontal)],
    );
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(300.0, 128.0), solid_image([255, 255, 255, 255])));
    let icon = solid_image([0, 128, 0, 255]);
    let scene = Scene {
        layout: Some(&layout),
        board: &board,
        dragging: None,
        rules: &rules,
        motif: &motif,
        socket_icon: Some(&icon),
    };
    let pixmap = render_pixmap(&scene, &RenderOptions::default()).unwrap().unwrap();
    assert_rgb_near(rgb(&pixmap, 47, 53), (0, 128, 0));
}

#[test]
fn socket_icon_keeps_its_aspect_ratio() {
    let layout = wide_layout();
    let rules = SocketRules::default();
    let board = SocketBoard::new(
        true,
        vec![SocketGroup::new("g", "p", 20.0, 20.0, 1, SocketDirection::Horizontal)],
    );
    let motif = MotifState::Ready(Motif::new(
        MotifSpec::new(300.0, 128.0),
        solid_image([255, 255, 255, 255]),
    ));
    // 2:1 icon over a 14 px socket: 14×7 px from the socket's top-left corner (40, 46)
    let icon = RasterImage::from_rgba8(8, 4, [0, 128, 0, 255].repeat(32)).unwrap();
    let scene = Scene {
        layout: Some(&layout),
        board: &board,
        dragging: None,
        rules: &rules,
        motif: &motif,
        socket_icon: Some(&icon),
    };
    let pixmap = render_pixmap(&scene, &RenderOptions::default()).unwrap().unwrap();
    assert_rgb_near(rgb(&pixmap, 47, 49), (0, 128, 0));
    assert_rgb_near(rgb(&pixmap, 41, 47), (0, 128, 0));
    // the lower half of the socket square stays uncovered
    assert_rgb_near(rgb(&pixmap, 47, 57), (255, 255, 255));
}

#[test]
fn rendering_is_deterministic() {
    let layout = wide_layout();
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(100.0, 50.0), split_image(20, 10)));
    let a = render(&layout, &SocketBoard::default(), &motif).unwrap();
    let b = render(&layout, &SocketBoard::default(), &motif).unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn png_and_jpeg_export() {
    let layout = wide_layout();
    let rules = SocketRules::default();
    let board = SocketBoard::default();
    let motif = MotifState::Ready(Motif::new(MotifSpec::new(100.0, 50.0), split_image(20, 10)));
    let scene = Scene {
        layout: Some(&layout),
        board: &board,
        dragging: None,
        rules: &rules,
        motif: &motif,
        socket_icon: None,
    };

    let png_bytes = render_to(&scene, &RenderOptions::default(), RasterFormat::Png)
        .unwrap()
        .unwrap();
    assert!(png_bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    let decoder = png::Decoder::new(std::io::Cursor::new(&png_bytes));
    let reader = decoder.read_info().unwrap();
    assert_eq!((reader.info().width, reader.info().height), (400, 100));

    // the export decodes back as a motif
    let reloaded = RasterImage::decode(&png_bytes).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (400, 100));

    let jpg = render_to(&scene, &RenderOptions::default(), RasterFormat::Jpeg)
        .unwrap()
        .unwrap();
    assert!(jpg.starts_with(&[0xFF, 0xD8]));

    let mut transparent = RenderOptions::default();
    transparent.style.background = "transparent".into();
    assert!(matches!(
        render_to(&scene, &transparent, RasterFormat::Jpeg),
        Err(RenderError::JpegOpaqueBackgroundRequired)
    ));

    let mut broken = RenderOptions::default();
    broken.style.socket_fill = "not-a-color".into();
    assert!(matches!(
        render_to(&scene, &broken, RasterFormat::Png),
        Err(RenderError::InvalidColor { field: "socket_fill", .. })
    ));
}
