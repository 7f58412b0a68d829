//! Window display via OpenCV highgui

use crate::error::Result;
use crate::image::with_image_view;
use crate::tensor::Tensor;
use opencv::highgui;
use tracing::debug;

/// Display a tensor image in a named window
///
/// Opens (or reuses) an auto-sized window and shows the image in it. The
/// window thread is started so the window stays responsive without the
/// caller pumping events.
pub fn display(tensor: &Tensor, window: &str) -> Result<()> {
    debug!(
        "display {}x{}x{} in window '{window}'",
        tensor.cols(),
        tensor.rows(),
        tensor.channels()
    );

    highgui::start_window_thread()?;
    highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;

    with_image_view(tensor, |view| {
        let mat = view.to_mat()?;
        highgui::imshow(window, &mat)?;
        Ok(())
    })
}
