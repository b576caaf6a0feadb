/// Colored text report of an imported object
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use plg_core::{plg, Object, Polygon, ShadingMode};
use std::io::{self, Write};

/// Writes object summaries, optionally styled for a terminal
pub struct ReportRenderer {
    color: bool,
}

impl ReportRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn draw<W: Write>(&self, object: &Object, writer: &mut W) -> io::Result<()> {
        self.styled(writer, Color::Yellow, &format!("Object {} (id {})", object.name, object.id))?;
        writeln!(writer)?;
        writeln!(
            writer,
            "  vertices: {}  polygons: {}  radius: {:.6}",
            object.num_vertices(),
            object.num_polys(),
            object.radius
        )?;

        for (index, poly) in object.polys.iter().enumerate() {
            self.draw_polygon(index, poly, writer)?;
        }
        Ok(())
    }

    /// Plain `x y z` lines, readable back as a PLG vertex section
    pub fn draw_vertices<W: Write>(&self, object: &Object, writer: &mut W) -> io::Result<()> {
        plg::write_vertices(object, writer)
    }

    fn draw_polygon<W: Write>(&self, index: usize, poly: &Polygon, writer: &mut W) -> io::Result<()> {
        write!(writer, "  polygon {:>3}: color {:>3} ", index, poly.color)?;
        self.styled(writer, shading_color(poly.shading), shading_name(poly.shading))?;
        writeln!(
            writer,
            " points {:?} normal length {:.6}",
            poly.vertex_list, poly.normal_length
        )
    }

    fn styled<W: Write>(&self, writer: &mut W, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(writer, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            write!(writer, "{}", text)
        }
    }
}

fn shading_name(mode: ShadingMode) -> &'static str {
    match mode {
        ShadingMode::Constant => "constant",
        ShadingMode::Flat => "flat",
        ShadingMode::Metallic => "metallic",
        ShadingMode::Glass => "glass",
        ShadingMode::Other(_) => "other",
    }
}

fn shading_color(mode: ShadingMode) -> Color {
    match mode {
        ShadingMode::Constant => Color::Grey,
        ShadingMode::Flat => Color::White,
        ShadingMode::Metallic => Color::Cyan,
        ShadingMode::Glass => Color::Blue,
        ShadingMode::Other(_) => Color::DarkGrey,
    }
}
