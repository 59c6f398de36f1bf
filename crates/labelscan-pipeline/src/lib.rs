// SPDX-License-Identifier: PMPL-1.0-or-later
//
// labelscan-pipeline — Document detection and rectification for the label
// scanner.
//
// One pass over a colour frame: HSV segmentation, contour selection, corner
// ordering, dimension estimation, shape validation, perspective rectification,
// and letterboxing into a fixed-size display canvas. A failed detection
// short-circuits with a recoverable error; the capture loop substitutes a
// fallback canvas and the next frame starts a fresh attempt.

pub mod capture;
pub mod frame;
pub mod letterbox;
pub mod quad;
pub mod rectify;
pub mod scanner;
pub mod segment;

pub use capture::{run_capture_loop, DebugFrameWriter, DisplaySink, FrameSource};
pub use frame::fallback_canvas;
pub use quad::OrderedCorners;
pub use scanner::LabelScanner;
