//! Console status messages written after a document is saved

use std::io;
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const IMAGE_EXT: &str = "png";

/// Suggested image path for rendering `dot_file`. Never the input itself.
pub fn render_target(dot_file: &Path) -> PathBuf {
    let is_image = dot_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXT));
    if is_image {
        dot_file.with_extension(format!("rendered.{IMAGE_EXT}"))
    } else {
        dot_file.with_extension(IMAGE_EXT)
    }
}

/// Tell the user where the document went and how to render it.
pub fn write_generated_message<W: WriteColor>(out: &mut W, dot_file: &Path) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "Graphviz DOT file generated:")?;
    out.reset()?;
    writeln!(out, " {}", dot_file.display())?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "Render it using:")?;
    out.reset()?;
    writeln!(
        out,
        " dot -Tpng {} -o {}",
        dot_file.display(),
        render_target(dot_file).display()
    )
}

/// Print the generated message to stderr.
pub fn print_generated(dot_file: &Path, use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    write_generated_message(&mut stderr, dot_file)
}
