// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image session — one loaded, resized image and the derived views built from
// it: rotations, smoothing, grayscale, edges, filled shapes and contours.

use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::edges::canny;
use imagelab_core::error::{ImageLabError, Result};
use tracing::{debug, info, instrument};

use crate::caption::{BLACK, WHITE, WHITE_LUMA, caption_anchor, draw_caption};
use crate::filters;
use crate::grid::{compose_grid, tile_size};
use crate::shapes::{self, OuterContour};
use crate::viewer::Viewer;

/// Loaded images are shrunk to this fraction of their width.
pub const WORKING_SCALE: f64 = 0.7;

/// Rotation angles in grid order, degrees counter-clockwise.
pub const ROTATION_ANGLES: [i32; 4] = [90, -90, 45, -45];
/// Scale applied alongside each rotation.
pub const ROTATION_SCALE: f32 = 0.5;

/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 70.0;
pub const CANNY_HIGH: f32 = 205.0;

/// Appended to every window title.
pub const DISMISS_HINT: &str = "Press 0 to close window";

const ORIGINAL_CAPTION: &str = "Original Image";
const CONTOURING_TITLE: &str = "Contouring Procedure";

/// Full window title for an optional view title.
pub fn window_title(title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{title}: {DISMISS_HINT}"),
        None => DISMISS_HINT.to_owned(),
    }
}

/// Contour overlay plus the number of outlines drawn on it.
#[derive(Debug, Clone)]
pub struct ContourOverlay {
    pub image: RgbImage,
    pub count: usize,
}

impl ContourOverlay {
    pub fn caption(&self) -> String {
        contour_caption(self.count)
    }
}

fn contour_caption(count: usize) -> String {
    format!("Contours. Number of objects: {count}")
}

fn rotation_caption(degrees: i32) -> String {
    format!("Rotated {degrees} degrees")
}

/// A single image and the read-only views derived from it.
///
/// The working raster is fixed at construction (`WORKING_SCALE` of the
/// original width, same aspect ratio) and never changes afterwards; every view
/// method works on a copy.
///
/// ```ignore
/// let session = ImageSession::open("shapes.jpg")?;
/// let gray = session.grayscale();
/// let filled = session.fill_shapes(&gray);
/// let objects = session.draw_contours(&filled);
/// session.show_contours(&mut viewer, &gray, &filled, &objects.image)?;
/// ```
pub struct ImageSession {
    image: RgbImage,
    caption_position: (i32, i32),
}

impl ImageSession {
    // -- Construction ---------------------------------------------------------

    /// Load and resize an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| ImageLabError::ImageLoad {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self::from_dynamic(img))
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data).map_err(|err| ImageLabError::ImageLoad {
            path: "<memory>".into(),
            reason: err.to_string(),
        })?;
        debug!(width = img.width(), height = img.height(), "Image decoded from bytes");
        Ok(Self::from_dynamic(img))
    }

    /// Wrap an already-decoded image. Alpha is dropped.
    pub fn from_dynamic(original: DynamicImage) -> Self {
        let image = filters::resize_by(&original.to_rgb8(), WORKING_SCALE);
        let caption_position = caption_anchor(image.height());
        info!(
            width = image.width(),
            height = image.height(),
            "Working image ready"
        );
        Self {
            image,
            caption_position,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Bottom-left anchor shared by every caption.
    pub fn caption_position(&self) -> (i32, i32) {
        self.caption_position
    }

    /// Borrow the working raster.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    // -- Views ----------------------------------------------------------------

    /// Four half-scale rotations (90, -90, 45, -45 degrees) in a 2x2 grid,
    /// each captioned in white.
    #[instrument(skip(self))]
    pub fn rotate(&self) -> RgbImage {
        let rotated: Vec<RgbImage> = ROTATION_ANGLES
            .iter()
            .map(|&angle| {
                let mut view = filters::rotate_scaled(&self.image, angle as f32, ROTATION_SCALE);
                self.caption(&mut view, &rotation_caption(angle), WHITE);
                view
            })
            .collect();

        self.grid([&rotated[0], &rotated[1], &rotated[2], &rotated[3]])
    }

    /// Original, averaging, Gaussian and median blurs in a 2x2 grid, each
    /// captioned in black.
    #[instrument(skip(self))]
    pub fn smoothen(&self) -> RgbImage {
        let mut averaging = filters::averaging_blur(&self.image);
        let mut gaussian = filters::gaussian_blur(&self.image);
        let mut median = filters::median_blur(&self.image);
        let original = self.captioned_original();

        self.caption(&mut averaging, "Averaging Blur", BLACK);
        self.caption(&mut gaussian, "Gaussian Blur", BLACK);
        self.caption(&mut median, "Median Blur", BLACK);

        self.grid([&original, &averaging, &gaussian, &median])
    }

    /// Single-channel BT.601 luma of the working image.
    pub fn grayscale(&self) -> GrayImage {
        filters::luma_bt601(&self.image)
    }

    /// Canny edge map of the grayscale view, captioned "Edges" in white.
    #[instrument(skip(self))]
    pub fn detect_edges(&self) -> GrayImage {
        let mut edges = canny(&self.grayscale(), CANNY_LOW, CANNY_HIGH);
        draw_caption(&mut edges, "Edges", self.caption_position, WHITE_LUMA);
        edges
    }

    /// Filled-silhouette mask of a grayscale view.
    pub fn fill_shapes(&self, gray: &GrayImage) -> GrayImage {
        shapes::fill_shapes(gray)
    }

    /// Outline every outermost shape of `filled` on a copy of the working
    /// image and caption it with the count.
    #[instrument(skip(self, filled))]
    pub fn draw_contours(&self, filled: &GrayImage) -> ContourOverlay {
        let contours: Vec<OuterContour> = shapes::find_outer_contours(filled);

        let mut objects = self.image.clone();
        for contour in &contours {
            shapes::draw_outline(&mut objects, contour, BLACK);
        }

        let count = contours.len();
        self.caption(&mut objects, &contour_caption(count), BLACK);
        info!(count, "Objects counted");

        ContourOverlay {
            image: objects,
            count,
        }
    }

    /// The contouring walkthrough as one grid: original and grayscale on top,
    /// filled mask and outlined objects below.
    pub fn contour_grid(&self, gray: &GrayImage, filled: &GrayImage, objects: &RgbImage) -> RgbImage {
        let original = self.captioned_original();

        let mut gray_rgb = DynamicImage::ImageLuma8(gray.clone()).to_rgb8();
        self.caption(&mut gray_rgb, "Grayscale Image", BLACK);

        let mut filled_rgb = DynamicImage::ImageLuma8(filled.clone()).to_rgb8();
        self.caption(&mut filled_rgb, "Image after Thresholding", WHITE);

        self.grid([&original, &gray_rgb, &filled_rgb, objects])
    }

    // -- Display --------------------------------------------------------------

    /// Present `image` (or the captioned working image when `None`) and block
    /// until it is dismissed.
    pub fn show<V: Viewer + ?Sized>(
        &self,
        viewer: &mut V,
        image: Option<DynamicImage>,
        title: Option<&str>,
    ) -> Result<()> {
        let image =
            image.unwrap_or_else(|| DynamicImage::ImageRgb8(self.captioned_original()));
        let title = window_title(title);
        info!(%title, width = image.width(), height = image.height(), "Presenting view");
        viewer.present(&title, &image)
    }

    /// Present the contouring walkthrough grid.
    pub fn show_contours<V: Viewer + ?Sized>(
        &self,
        viewer: &mut V,
        gray: &GrayImage,
        filled: &GrayImage,
        objects: &RgbImage,
    ) -> Result<()> {
        let grid = self.contour_grid(gray, filled, objects);
        self.show(viewer, Some(DynamicImage::ImageRgb8(grid)), Some(CONTOURING_TITLE))
    }

    // -- Helpers --------------------------------------------------------------

    fn caption(&self, view: &mut RgbImage, text: &str, color: image::Rgb<u8>) {
        draw_caption(view, text, self.caption_position, color);
    }

    fn captioned_original(&self) -> RgbImage {
        let mut original = self.image.clone();
        self.caption(&mut original, ORIGINAL_CAPTION, BLACK);
        original
    }

    fn grid(&self, tiles: [&RgbImage; 4]) -> RgbImage {
        let (tile_width, tile_height) = tile_size(self.width(), self.height());
        compose_grid(tiles, tile_width, tile_height)
    }
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::RecordingViewer;
    use image::imageops::{self, FilterType};
    use image::{ColorType, Luma, Rgb};

    /// White 200x160 canvas with three well separated rectangles of `color`.
    fn three_shapes_in(color: Rgb<u8>) -> DynamicImage {
        let mut img = RgbImage::from_pixel(200, 160, Rgb([255, 255, 255]));
        let shapes = [(20, 20, 60, 60), (90, 30, 130, 70), (150, 90, 190, 140)];
        for (x0, y0, x1, y1) in shapes {
            for y in y0..y1 {
                for x in x0..x1 {
                    img.put_pixel(x, y, color);
                }
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    fn three_shapes() -> DynamicImage {
        three_shapes_in(Rgb([30, 60, 200]))
    }

    /// Tile `index` (0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right).
    fn quadrant(grid: &RgbImage, index: u32) -> RgbImage {
        let (tw, th) = (grid.width() / 2, grid.height() / 2);
        imageops::crop_imm(grid, index % 2 * tw, index / 2 * th, tw, th).to_image()
    }

    /// `view` captioned at the session anchor and shrunk to tile size.
    fn expected_tile(
        session: &ImageSession,
        view: &RgbImage,
        text: &str,
        color: Rgb<u8>,
    ) -> RgbImage {
        let mut view = view.clone();
        draw_caption(&mut view, text, session.caption_position(), color);
        let (tw, th) = tile_size(session.width(), session.height());
        imageops::resize(&view, tw, th, FilterType::Triangle)
    }

    #[test]
    fn working_raster_is_seventy_percent_wide() {
        for (w, h) in [(200u32, 160u32), (333, 101), (64, 480)] {
            let session = ImageSession::from_dynamic(DynamicImage::new_rgb8(w, h));
            let expected_w = (w as f64 * 0.7).floor() as u32;
            assert_eq!(session.width(), expected_w);
            assert_eq!(session.height(), (h as u64 * expected_w as u64 / w as u64) as u32);
        }
    }

    #[test]
    fn caption_position_tracks_working_height() {
        let session = ImageSession::from_dynamic(three_shapes());
        assert_eq!((session.width(), session.height()), (140, 112));
        assert_eq!(session.caption_position(), (20, 102));
    }

    #[test]
    fn rotate_grid_is_even_rounded_working_size() {
        let session = ImageSession::from_dynamic(DynamicImage::new_rgb8(203, 151));
        let grid = session.rotate();
        assert_eq!(grid.width(), session.width() / 2 * 2);
        assert_eq!(grid.height(), session.height() / 2 * 2);
    }

    #[test]
    fn smoothen_grid_matches_rotate_grid() {
        let session = ImageSession::from_dynamic(three_shapes());
        assert_eq!(session.smoothen().dimensions(), session.rotate().dimensions());
    }

    #[test]
    fn rotation_captions_use_whole_degrees() {
        assert_eq!(rotation_caption(90), "Rotated 90 degrees");
        assert_eq!(rotation_caption(-90), "Rotated -90 degrees");
        assert_eq!(rotation_caption(-45), "Rotated -45 degrees");
    }

    #[test]
    fn rotate_tiles_follow_angle_order() {
        let session = ImageSession::from_dynamic(three_shapes());
        let grid = session.rotate();

        for (index, angle) in ROTATION_ANGLES.into_iter().enumerate() {
            let rotated = filters::rotate_scaled(session.image(), angle as f32, ROTATION_SCALE);
            let expected = expected_tile(&session, &rotated, &rotation_caption(angle), WHITE);
            assert_eq!(quadrant(&grid, index as u32), expected, "tile for {angle} degrees");
        }
    }

    #[test]
    fn smoothen_tiles_follow_filter_order() {
        let session = ImageSession::from_dynamic(three_shapes());
        let grid = session.smoothen();
        let image = session.image();

        let expected = [
            expected_tile(&session, image, "Original Image", BLACK),
            expected_tile(&session, &filters::averaging_blur(image), "Averaging Blur", BLACK),
            expected_tile(&session, &filters::gaussian_blur(image), "Gaussian Blur", BLACK),
            expected_tile(&session, &filters::median_blur(image), "Median Blur", BLACK),
        ];
        for (index, tile) in expected.iter().enumerate() {
            assert_eq!(&quadrant(&grid, index as u32), tile, "smoothing tile {index}");
        }
    }

    #[test]
    fn contour_grid_tiles_follow_walkthrough_order() {
        let session = ImageSession::from_dynamic(three_shapes());
        let gray = session.grayscale();
        let filled = session.fill_shapes(&gray);
        let objects = session.draw_contours(&filled);
        let grid = session.contour_grid(&gray, &filled, &objects.image);

        let gray_rgb = DynamicImage::ImageLuma8(gray.clone()).to_rgb8();
        let filled_rgb = DynamicImage::ImageLuma8(filled.clone()).to_rgb8();
        let (tw, th) = tile_size(session.width(), session.height());

        let expected = [
            expected_tile(&session, session.image(), "Original Image", BLACK),
            expected_tile(&session, &gray_rgb, "Grayscale Image", BLACK),
            expected_tile(&session, &filled_rgb, "Image after Thresholding", WHITE),
        ];
        for (index, tile) in expected.iter().enumerate() {
            assert_eq!(&quadrant(&grid, index as u32), tile, "walkthrough tile {index}");
        }
        assert_eq!(
            quadrant(&grid, 3),
            imageops::resize(&objects.image, tw, th, FilterType::Triangle)
        );

        // Grayscale and mask tiles carry no colour; original and objects do.
        let is_gray = |p: &Rgb<u8>| p.0[0] == p.0[1] && p.0[1] == p.0[2];
        assert!(quadrant(&grid, 2).pixels().all(is_gray));
        assert!(quadrant(&grid, 1).pixels().all(is_gray));
        assert!(!quadrant(&grid, 0).pixels().all(is_gray));
        assert!(!quadrant(&grid, 3).pixels().all(is_gray));
    }

    #[test]
    fn grayscale_is_single_channel_working_size() {
        let session = ImageSession::from_dynamic(three_shapes());
        let gray = DynamicImage::ImageLuma8(session.grayscale());
        assert_eq!(gray.color(), ColorType::L8);
        assert_eq!((gray.width(), gray.height()), (session.width(), session.height()));
    }

    #[test]
    fn edges_trace_shape_borders() {
        let session = ImageSession::from_dynamic(three_shapes());
        let edges = session.detect_edges();
        assert_eq!(edges.dimensions(), (140, 112));
        // Nothing above the first rectangle's top edge; something along it.
        assert!((0..140).all(|x| edges.get_pixel(x, 2).0[0] == 0));
        let left_edge_hit = (20..36)
            .flat_map(|y| (11..18).map(move |x| (x, y)))
            .any(|(x, y)| edges.get_pixel(x, y).0[0] == 255);
        assert!(left_edge_hit);
    }

    #[test]
    fn three_shapes_are_counted() {
        let session = ImageSession::from_dynamic(three_shapes());
        let gray = session.grayscale();
        let filled = session.fill_shapes(&gray);
        let objects = session.draw_contours(&filled);

        assert_eq!(objects.count, 3);
        assert_eq!(objects.caption(), "Contours. Number of objects: 3");
        assert_eq!(objects.image.dimensions(), session.image().dimensions());
        // Outline on the first rectangle's left edge, interior untouched.
        assert_eq!(*objects.image.get_pixel(14, 28), Rgb([0, 0, 0]));
        assert_eq!(objects.image.get_pixel(28, 28), session.image().get_pixel(28, 28));
    }

    #[test]
    fn light_cyan_shapes_are_counted() {
        // BT.601 luma of (150, 255, 255) is 224, just under the fill threshold.
        let session = ImageSession::from_dynamic(three_shapes_in(Rgb([150, 255, 255])));
        let gray = session.grayscale();
        let filled = session.fill_shapes(&gray);
        assert_eq!(session.draw_contours(&filled).count, 3);
    }

    #[test]
    fn blank_mask_counts_nothing() {
        let session = ImageSession::from_dynamic(DynamicImage::new_rgb8(50, 50));
        let overlay = session.draw_contours(&GrayImage::from_pixel(35, 35, Luma([0])));
        assert_eq!(overlay.count, 0);
    }

    #[test]
    fn views_leave_working_raster_untouched() {
        let session = ImageSession::from_dynamic(three_shapes());
        let before = session.image().clone();

        let gray = session.grayscale();
        let filled = session.fill_shapes(&gray);
        let objects = session.draw_contours(&filled);
        let _ = session.rotate();
        let _ = session.contour_grid(&gray, &filled, &objects.image);

        assert_eq!(session.image(), &before);
    }

    #[test]
    fn show_defaults_to_captioned_original() {
        let session = ImageSession::from_dynamic(three_shapes());
        let mut viewer = RecordingViewer::new();

        session.show(&mut viewer, None, Some("Shapes")).unwrap();
        session.show(&mut viewer, None, None).unwrap();

        let shown = viewer.presentations();
        assert_eq!(shown[0].title, "Shapes: Press 0 to close window");
        assert_eq!(shown[1].title, "Press 0 to close window");
        assert_eq!((shown[0].width, shown[0].height), (140, 112));
        assert_eq!(shown[0].color, ColorType::Rgb8);
    }

    #[test]
    fn show_contours_presents_rgb_grid() {
        let session = ImageSession::from_dynamic(three_shapes());
        let gray = session.grayscale();
        let filled = session.fill_shapes(&gray);
        let objects = session.draw_contours(&filled);
        let mut viewer = RecordingViewer::new();

        session
            .show_contours(&mut viewer, &gray, &filled, &objects.image)
            .unwrap();

        let shown = &viewer.presentations()[0];
        assert_eq!(shown.title, "Contouring Procedure: Press 0 to close window");
        assert_eq!(shown.color, ColorType::Rgb8);
        assert_eq!((shown.width, shown.height), (140, 112));

        let presented = viewer.last_image().and_then(DynamicImage::as_rgb8).unwrap();
        assert_eq!(presented, &session.contour_grid(&gray, &filled, &objects.image));
    }

    #[test]
    fn open_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("shapes.jpg");
        match ImageSession::open(&missing) {
            Err(ImageLabError::ImageLoad { path, .. }) => {
                assert!(path.ends_with("shapes.jpg"));
            }
            Err(other) => panic!("unexpected error variant: {other}"),
            Ok(_) => panic!("missing file must not load"),
        }
    }

    #[test]
    fn open_decodes_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shapes.png");
        three_shapes().save(&path).unwrap();

        let session = ImageSession::open(&path).unwrap();
        assert_eq!((session.width(), session.height()), (140, 112));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(ImageSession::from_bytes(b"definitely not an image").is_err());
    }
}
