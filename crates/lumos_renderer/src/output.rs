//! Writing rendered images to disk or a stream.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{color_to_rgb, ImageBuffer, RenderError};

/// Write the image as plain-text PPM (P3): a header, then one `R G B` line
/// per pixel, rows top to bottom.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}

/// Save as PPM.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    Ok(())
}

/// Save as PNG.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let img = image::RgbImage::from_fn(image.width, image.height, |x, y| {
        image::Rgb(color_to_rgb(image.get(x, y)))
    });
    img.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    Ok(())
}

/// Save by extension: `.png` writes PNG, anything else PPM.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        save_png(image, path)?;
    } else {
        save_ppm(image, path)?;
    }
    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
