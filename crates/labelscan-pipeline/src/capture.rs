// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Capture loop: drive the scanner once per externally-delivered frame and
// keep the display fed even when detection fails.

use std::path::{Path, PathBuf};

use image::RgbImage;
use labelscan_core::{Frame, OutputCanvas, Result, ScanError};
use tracing::{info, warn};

use crate::frame::{decode_frame, fallback_canvas};
use crate::quad::draw_quad_overlay;
use crate::scanner::LabelScanner;

/// Supplies one raw pixel buffer per tick.
///
/// Returning `Ok(None)` ends the stream. The core treats the buffer as an
/// opaque fixed-layout array; only the colorspace adaptation in the segmenter
/// interprets it.
pub trait FrameSource {
    fn grab(&mut self) -> Result<Option<Frame>>;
}

/// Accepts the fixed-size output canvas produced for each frame.
pub trait DisplaySink {
    fn present(&mut self, canvas: &OutputCanvas) -> Result<()>;
}

/// Persists frames to disk for debugging.
///
/// The frame index is threaded through the call explicitly — the capture
/// loop owns the counter, not this writer.
pub struct DebugFrameWriter {
    dir: PathBuf,
}

impl DebugFrameWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write a frame as `frame_{index}.png` and return the path.
    pub fn save(&self, index: u64, image: &RgbImage) -> Result<PathBuf> {
        let path = self.dir.join(format!("frame_{index}.png"));
        image
            .save(&path)
            .map_err(|err| ScanError::Image(format!("failed to save debug frame: {err}")))?;
        Ok(path)
    }
}

/// Run the scanner over every frame the source delivers, presenting each
/// result to the sink within the same tick.
///
/// A recoverable failure (no quadrilateral, implausible shape) is logged and
/// replaced by the fallback canvas — the loop never aborts on a failed
/// detection, and no retry happens within a frame. Fatal errors (I/O, sink
/// failure) propagate. Returns the number of frames processed.
pub fn run_capture_loop(
    source: &mut dyn FrameSource,
    sink: &mut dyn DisplaySink,
    scanner: &LabelScanner,
    debug_writer: Option<&DebugFrameWriter>,
) -> Result<u64> {
    let mut frames: u64 = 0;

    while let Some(frame) = source.grab()? {
        frames += 1;

        if let Some(writer) = debug_writer {
            // Overlay drawing happens on a decoded copy; the frame itself
            // stays untouched.
            let mut copy = decode_frame(&frame);
            if scanner.config().detector.debug_overlay {
                if let Ok(corners) = scanner.detect_corners(&copy) {
                    draw_quad_overlay(&mut copy, &corners);
                }
            }
            writer.save(frames, &copy)?;
        }

        match scanner.scan_frame(&frame) {
            Ok(canvas) => sink.present(&canvas)?,
            Err(err) if err.is_recoverable() => {
                warn!(frame = frames, error = %err, "Detection failed, presenting fallback");
                sink.present(&fallback_canvas(&scanner.config().display))?;
            }
            Err(err) => return Err(err),
        }
    }

    info!(frames, "Capture loop finished");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use labelscan_core::{Config, PixelOrder};

    struct VecSource {
        frames: Vec<Frame>,
    }

    impl FrameSource for VecSource {
        fn grab(&mut self) -> Result<Option<Frame>> {
            if self.frames.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.frames.remove(0)))
            }
        }
    }

    struct CollectingSink {
        canvases: Vec<OutputCanvas>,
    }

    impl DisplaySink for CollectingSink {
        fn present(&mut self, canvas: &OutputCanvas) -> Result<()> {
            self.canvases.push(canvas.clone());
            Ok(())
        }
    }

    fn bgra_frame(fill: impl Fn(u32, u32) -> [u8; 3]) -> Frame {
        let (w, h) = (640u32, 480u32);
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                let [r, g, b] = fill(x, y);
                data.extend_from_slice(&[b, g, r, 255]);
            }
        }
        Frame::from_raw(w, h, PixelOrder::Bgra, data).unwrap()
    }

    fn label_frame() -> Frame {
        bgra_frame(|x, y| {
            if (170..470).contains(&x) && (90..390).contains(&y) {
                [200, 210, 205]
            } else {
                [20, 200, 30]
            }
        })
    }

    fn black_frame() -> Frame {
        bgra_frame(|_, _| [0, 0, 0])
    }

    #[test]
    fn every_frame_gets_exactly_one_canvas() {
        let scanner = LabelScanner::new(Config::default()).unwrap();
        let mut source = VecSource {
            frames: vec![label_frame(), black_frame(), label_frame()],
        };
        let mut sink = CollectingSink { canvases: vec![] };

        let frames = run_capture_loop(&mut source, &mut sink, &scanner, None).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(sink.canvases.len(), 3);
        for canvas in &sink.canvases {
            assert_eq!((canvas.width, canvas.height), (480, 480));
            assert_eq!(canvas.data.len(), 480 * 480 * 4);
        }
    }

    #[test]
    fn black_frame_yields_the_fallback_canvas() {
        let scanner = LabelScanner::new(Config::default()).unwrap();
        let mut source = VecSource {
            frames: vec![black_frame()],
        };
        let mut sink = CollectingSink { canvases: vec![] };

        run_capture_loop(&mut source, &mut sink, &scanner, None).unwrap();
        let canvas = &sink.canvases[0];
        // Solid blue in BGRA byte order.
        assert!(canvas.data.chunks(4).all(|px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn debug_overlay_frames_are_persisted_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DebugFrameWriter::new(dir.path());

        let mut config = Config::default();
        config.detector.debug_overlay = true;
        let scanner = LabelScanner::new(config).unwrap();

        let mut source = VecSource {
            frames: vec![label_frame(), black_frame()],
        };
        let mut sink = CollectingSink { canvases: vec![] };

        run_capture_loop(&mut source, &mut sink, &scanner, Some(&writer)).unwrap();
        assert!(dir.path().join("frame_1.png").exists());
        assert!(dir.path().join("frame_2.png").exists());

        // The overlay was drawn onto the saved copy of the detected frame.
        let saved = image::open(dir.path().join("frame_1.png")).unwrap().to_rgb8();
        assert!(saved.pixels().any(|px| px.0 == [255, 0, 0]));
    }

    #[test]
    fn debug_writer_uses_the_threaded_counter() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DebugFrameWriter::new(dir.path());
        let image = RgbImage::from_pixel(4, 4, Rgb([7u8, 8, 9]));

        let first = writer.save(1, &image).unwrap();
        let second = writer.save(2, &image).unwrap();
        assert!(first.ends_with("frame_1.png"));
        assert!(second.ends_with("frame_2.png"));
        assert!(first.exists() && second.exists());
    }
}
