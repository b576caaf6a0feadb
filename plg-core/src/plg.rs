/// PLG object importer and writer
///
/// A PLG file is a header line `name vertex_count polygon_count`, followed by
/// one `x y z` line per vertex and one `color count idx...` line per polygon.
/// `#` and `;` start comments and blank lines are ignored.
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::config::ImporterConfig;
use crate::error::{PlgError, Section};
use crate::geometry::{ColorDescriptor, Object, ObjectState, Polygon, MIN_POINTS_PER_POLY};
use crate::lexer::{parse_color_descriptor, parse_f32, parse_int, Fields};
use crate::math::{magnitude, Point3D};
use crate::reader::LineReader;

/// Where the importer is in the grammar. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Header,
    Vertices { expected: usize, polys: usize },
    Polygons { expected: usize },
    Done,
}

#[derive(Debug)]
struct Header<'a> {
    name: &'a str,
    vertices: usize,
    polys: usize,
}

/// An import session.
///
/// Every successfully parsed header takes the next id from the session, so
/// objects imported through one `Importer` get increasing ids.
#[derive(Debug, Default)]
pub struct Importer {
    config: ImporterConfig,
    next_id: u32,
}

impl Importer {
    pub fn new(config: ImporterConfig) -> Self {
        Self { config, next_id: 0 }
    }

    pub fn with_first_id(mut self, id: u32) -> Self {
        self.next_id = id;
        self
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// The id the next imported object will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn reset_ids(&mut self) {
        self.next_id = 0;
    }

    /// Load an object off disk, scaling every vertex by `scale`
    pub fn import(&mut self, path: impl AsRef<Path>, scale: f32) -> Result<Object, PlgError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            log::error!("Couldn't open file {}: {}", path.display(), source);
            PlgError::FileOpen {
                path: path.to_path_buf(),
                source,
            }
        })?;

        match self.import_reader(BufReader::new(file), scale) {
            Ok(object) => {
                log::info!(
                    "Loaded {} from {}: {} vertices, {} polygons",
                    object.name,
                    path.display(),
                    object.num_vertices(),
                    object.num_polys()
                );
                Ok(object)
            }
            Err(err) => {
                log::error!("Error with PLG file {}: {}", path.display(), err);
                Err(err.in_file(path))
            }
        }
    }

    /// Import an object from any buffered stream
    pub fn import_reader<R: BufRead>(&mut self, reader: R, scale: f32) -> Result<Object, PlgError> {
        let mut lines = LineReader::new(reader, self.config.max_line_length);
        let mut object = Object::default();
        let mut phase = Phase::Header;

        loop {
            log::debug!("PLG phase {:?}", phase);
            phase = match phase {
                Phase::Header => {
                    let line = lines.next_line()?.ok_or_else(|| PlgError::MalformedHeader {
                        line: lines.line_number(),
                        reason: "missing header line".to_string(),
                    })?;
                    let header = self.parse_header(&line, lines.line_number())?;

                    object.name = header.name.to_string();
                    object.world_pos = Point3D::ORIGIN;
                    object.state = ObjectState::Loaded;
                    object.id = self.take_id();

                    Phase::Vertices {
                        expected: header.vertices,
                        polys: header.polys,
                    }
                }
                Phase::Vertices { expected, polys } => {
                    while object.num_vertices() < expected {
                        let line = next_record(&mut lines, Section::Vertices, expected, object.num_vertices())?;
                        let vertex = parse_vertex(&line, lines.line_number())?;
                        log::trace!("vertex {}: {:?}", object.num_vertices(), vertex);
                        object.push_vertex(vertex.scaled(scale));
                    }
                    Phase::Polygons { expected: polys }
                }
                Phase::Polygons { expected } => {
                    while object.num_polys() < expected {
                        let line = next_record(&mut lines, Section::Polygons, expected, object.num_polys())?;
                        let poly = self.parse_polygon(&line, lines.line_number(), &object.vertices_local)?;
                        log::trace!("polygon {}: {:?}", object.num_polys(), poly);
                        object.polys.push(poly);
                    }
                    Phase::Done
                }
                Phase::Done => break,
            };
        }

        drop(lines);
        object.compute_radius(self.config.radius_mode);
        Ok(object)
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn parse_header<'a>(&self, line: &'a str, line_number: usize) -> Result<Header<'a>, PlgError> {
        let mut fields = Fields::new(line);
        let name = fields.next().ok_or_else(|| PlgError::MalformedHeader {
            line: line_number,
            reason: "missing object name".to_string(),
        })?;
        let vertices = header_count(fields.next(), line_number, "vertex count")?;
        let polys = header_count(fields.next(), line_number, "polygon count")?;

        let limits = &self.config.limits;
        if vertices > limits.max_vertices {
            return Err(PlgError::CapacityExceeded {
                what: "vertex",
                requested: vertices,
                capacity: limits.max_vertices,
            });
        }
        if polys > limits.max_polys {
            return Err(PlgError::CapacityExceeded {
                what: "polygon",
                requested: polys,
                capacity: limits.max_polys,
            });
        }

        Ok(Header { name, vertices, polys })
    }

    fn parse_polygon(&self, line: &str, line_number: usize, vertices: &[Point3D]) -> Result<Polygon, PlgError> {
        let mut fields = Fields::new(line);

        let token = fields.next();
        let raw = token
            .and_then(parse_color_descriptor)
            .ok_or_else(|| invalid_token(line_number, "color descriptor", token))?;
        let descriptor = ColorDescriptor::decode(raw);

        let token = fields.next();
        let count = token
            .and_then(parse_int)
            .ok_or_else(|| invalid_token(line_number, "polygon vertex count", token))?;
        if count < MIN_POINTS_PER_POLY as i64 {
            return Err(PlgError::InvalidPolygonVertexCount {
                line: line_number,
                count,
            });
        }

        let capacity = self.config.limits.max_points_per_poly;
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        if count > capacity {
            return Err(PlgError::CapacityExceeded {
                what: "polygon point",
                requested: count,
                capacity,
            });
        }

        let mut vertex_list = Vec::with_capacity(count);
        for _ in 0..count {
            let token = fields.next();
            let index = token
                .and_then(parse_int)
                .ok_or_else(|| invalid_token(line_number, "vertex index", token))?;
            let index = usize::try_from(index)
                .ok()
                .filter(|&i| i < vertices.len())
                .ok_or(PlgError::VertexIndexOutOfRange {
                    line: line_number,
                    index,
                    num_vertices: vertices.len(),
                })?;
            vertex_list.push(index);
        }

        let mut poly = Polygon::new(vertex_list, descriptor);
        poly.normal_length = poly
            .face_normal(vertices)
            .map_or(0.0, |normal| magnitude(&normal));
        Ok(poly)
    }
}

fn next_record<R: BufRead>(
    lines: &mut LineReader<R>,
    section: Section,
    expected: usize,
    found: usize,
) -> Result<String, PlgError> {
    lines.next_line()?.ok_or(PlgError::TruncatedInput {
        section,
        expected,
        found,
    })
}

fn header_count(token: Option<&str>, line: usize, what: &str) -> Result<usize, PlgError> {
    let token = token.ok_or_else(|| PlgError::MalformedHeader {
        line,
        reason: format!("missing {}", what),
    })?;
    let value = parse_int(token).ok_or_else(|| PlgError::MalformedHeader {
        line,
        reason: format!("{} {:?} is not an integer", what, token),
    })?;
    usize::try_from(value).map_err(|_| PlgError::MalformedHeader {
        line,
        reason: format!("{} {} is negative", what, value),
    })
}

fn parse_vertex(line: &str, line_number: usize) -> Result<Point3D, PlgError> {
    let mut fields = Fields::new(line);
    let mut coordinate = |expected: &'static str| {
        let token = fields.next();
        token
            .and_then(parse_f32)
            .ok_or_else(|| invalid_token(line_number, expected, token))
    };
    let x = coordinate("x coordinate")?;
    let y = coordinate("y coordinate")?;
    let z = coordinate("z coordinate")?;
    Ok(Point3D::new(x, y, z))
}

fn invalid_token(line: usize, expected: &'static str, token: Option<&str>) -> PlgError {
    PlgError::InvalidToken {
        line,
        expected,
        token: token.map(str::to_string),
    }
}

/// Write an object back out as PLG text.
///
/// Coordinates use the shortest exact `f32` representation, so importing the
/// output at scale 1.0 reproduces the local vertices.
pub fn write_object<W: Write>(object: &Object, out: &mut W) -> io::Result<()> {
    let name = if object.name.is_empty() { "object" } else { object.name.as_str() };
    writeln!(out, "{} {} {}", name, object.num_vertices(), object.num_polys())?;
    writeln!(out, "# vertices")?;
    write_vertices(object, out)?;
    writeln!(out, "# polygons")?;
    for poly in &object.polys {
        let descriptor = ColorDescriptor {
            palette_color: poly.color,
            shading_mode: poly.shading,
        };
        write!(out, "0x{:04X} {}", descriptor.encode(), poly.num_points())?;
        for index in &poly.vertex_list {
            write!(out, " {}", index)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write one `x y z` line per local vertex
pub fn write_vertices<W: Write>(object: &Object, out: &mut W) -> io::Result<()> {
    for v in &object.vertices_local {
        writeln!(out, "{} {} {}", v.x, v.y, v.z)?;
    }
    Ok(())
}
