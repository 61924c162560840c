//! SVG path data (`d` attribute) parsing and serialization.
//!
//! Supported commands are `M L H V C S Z` in both absolute and relative form.
//! Arguments of other commands are skipped with a warning.

use crate::point::{Command, PathPoint};
use kurbo::{Point, Vec2};
use std::fmt::Write;

/// Points and closed flag read from a `d` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPathData {
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Letter(char),
    Number(f64),
}

/// Split path data into command letters and numbers.
///
/// Numbers end at a separator, at a sign that does not follow an exponent
/// marker, or at a second decimal point (`1.5.5` is `1.5 .5`). A numeric run
/// that does not parse yields 0 with a warning.
fn tokenize(data: &str) -> Vec<Token> {
    let chars: Vec<char> = data.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == ',' {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
            let start = i;
            let mut seen_dot = false;
            let mut seen_exp = false;
            if c == '-' || c == '+' {
                i += 1;
            }
            while i < chars.len() {
                let ch = chars[i];
                if ch.is_ascii_digit() {
                    i += 1;
                } else if ch == '.' && !seen_dot && !seen_exp {
                    seen_dot = true;
                    i += 1;
                } else if (ch == 'e' || ch == 'E') && !seen_exp && exponent_follows(&chars, i) {
                    seen_exp = true;
                    i += 1;
                    if matches!(chars.get(i), Some('-' | '+')) {
                        i += 1;
                    }
                } else {
                    break;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text.parse::<f64>().unwrap_or_else(|_| {
                log::warn!("Malformed number {:?} in path data, using 0", text);
                0.0
            });
            tokens.push(Token::Number(value));
            continue;
        }
        if c.is_ascii_alphabetic() {
            tokens.push(Token::Letter(c));
        } else {
            log::warn!("Unexpected character {:?} in path data", c);
        }
        i += 1;
    }
    tokens
}

/// Whether `chars[i]` (an `e`/`E`) starts a valid exponent.
fn exponent_follows(chars: &[char], i: usize) -> bool {
    match chars.get(i + 1) {
        Some(c) if c.is_ascii_digit() => true,
        Some('-' | '+') => chars.get(i + 2).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Path data parser state.
struct PathDataParser {
    command: Command,
    relative: bool,
    pen: Point,
    subpath_start: Point,
    /// A `Z` was seen; the next drawing command restarts at `subpath_start`.
    restart: bool,
    args: Vec<f64>,
    points: Vec<PathPoint>,
    closed: bool,
}

impl PathDataParser {
    fn new() -> Self {
        Self {
            command: Command::None,
            relative: false,
            pen: Point::ZERO,
            subpath_start: Point::ZERO,
            restart: false,
            args: Vec::with_capacity(6),
            points: Vec::new(),
            closed: false,
        }
    }

    fn letter(&mut self, letter: char) {
        self.discard_partial();
        if letter == 'Z' || letter == 'z' {
            self.closed = true;
            self.pen = self.subpath_start;
            self.restart = true;
            self.command = Command::None;
            return;
        }
        match Command::from_svg_letter(letter) {
            Some((command, relative)) => {
                self.command = command;
                self.relative = relative;
            }
            None => {
                log::warn!("Unsupported path command {:?}; skipping its arguments", letter);
                self.command = Command::None;
            }
        }
    }

    fn number(&mut self, value: f64) {
        let arity = self.command.arity();
        if arity == 0 {
            return;
        }
        self.args.push(value);
        if self.args.len() == arity {
            let args = std::mem::take(&mut self.args);
            self.execute(&args);
            self.args = args;
            self.args.clear();
        }
    }

    fn discard_partial(&mut self) {
        if !self.args.is_empty() {
            log::warn!(
                "Incomplete arguments for {:?}: {:?}; ignoring",
                self.command,
                self.args
            );
            self.args.clear();
        }
    }

    fn resolve(&self, x: f64, y: f64) -> Point {
        if self.relative {
            self.pen + Vec2::new(x, y)
        } else {
            Point::new(x, y)
        }
    }

    /// Start a subpath at the pen if a drawing command has nothing to draw from.
    fn ensure_start(&mut self) {
        if self.points.is_empty() || self.restart {
            self.restart = false;
            self.points.push(PathPoint::at(self.pen).with_command(Command::Move));
        }
    }

    fn push(&mut self, position: Point, command: Command) {
        self.ensure_start();
        self.points.push(PathPoint::at(position).with_command(command));
        self.pen = position;
    }

    fn execute(&mut self, a: &[f64]) {
        match self.command {
            Command::Move => {
                let p = self.resolve(a[0], a[1]);
                self.restart = false;
                self.points.push(PathPoint::at(p).with_command(Command::Move));
                self.pen = p;
                self.subpath_start = p;
                // Further pairs are implicit line-tos.
                self.command = Command::Line;
            }
            Command::Line => {
                let p = self.resolve(a[0], a[1]);
                self.push(p, Command::Line);
            }
            Command::Horizontal => {
                let x = if self.relative { self.pen.x + a[0] } else { a[0] };
                self.push(Point::new(x, self.pen.y), Command::Horizontal);
            }
            Command::Vertical => {
                let y = if self.relative { self.pen.y + a[0] } else { a[0] };
                self.push(Point::new(self.pen.x, y), Command::Vertical);
            }
            Command::CubicBezier => {
                let c1 = self.resolve(a[0], a[1]);
                let c2 = self.resolve(a[2], a[3]);
                let end = self.resolve(a[4], a[5]);
                self.curve(Some(c1), c2, end, Command::CubicBezier);
            }
            Command::SmoothCubicBezier => {
                let c2 = self.resolve(a[0], a[1]);
                let end = self.resolve(a[2], a[3]);
                self.curve(None, c2, end, Command::SmoothCubicBezier);
            }
            Command::None | Command::Handle => {}
        }
    }

    /// Append a cubic segment. Without `c1` the outgoing handle of the
    /// previous point mirrors its incoming one when that point ended a curve.
    fn curve(&mut self, c1: Option<Point>, c2: Point, end: Point, command: Command) {
        self.ensure_start();
        if let Some(prev) = self.points.last_mut() {
            prev.right_handle = Some(match c1 {
                Some(c1) => c1 - prev.position,
                None if matches!(
                    prev.command,
                    Command::CubicBezier | Command::SmoothCubicBezier
                ) =>
                {
                    -prev.left_handle.unwrap_or(Vec2::ZERO)
                }
                None => Vec2::ZERO,
            });
        }
        let mut point = PathPoint::at(end).with_command(command);
        point.set_left_handle_position(c2);
        self.points.push(point);
        self.pen = end;
    }

    fn finish(mut self) -> ParsedPathData {
        self.discard_partial();
        ParsedPathData {
            points: self.points,
            closed: self.closed,
        }
    }
}

/// Parse a `d` attribute into tagged points.
///
/// Never fails: malformed numbers become 0 and unsupported commands are
/// skipped, each with a warning.
pub fn parse_path_data(data: &str) -> ParsedPathData {
    let mut parser = PathDataParser::new();
    for token in tokenize(data) {
        match token {
            Token::Letter(letter) => parser.letter(letter),
            Token::Number(value) => parser.number(value),
        }
    }
    parser.finish()
}

/// Serialize points into a `d` attribute.
///
/// The first point and `Move` points become `M`; segments with a non-zero
/// handle on either end become `C` with absolute control points, the rest `L`.
pub fn write_path_data(points: &[PathPoint], closed: bool) -> String {
    let mut data = String::new();

    for (i, point) in points.iter().enumerate() {
        if !data.is_empty() {
            data.push(' ');
        }
        let p = point.position;
        if i == 0 || point.is_move() {
            if i > 0 && closed {
                data.push_str("Z ");
            }
            let _ = write!(data, "M{:.2},{:.2}", p.x, p.y);
            continue;
        }

        let prev = &points[i - 1];
        let out = prev.right_handle.unwrap_or(Vec2::ZERO);
        let inc = point.left_handle.unwrap_or(Vec2::ZERO);
        if out == Vec2::ZERO && inc == Vec2::ZERO {
            let _ = write!(data, "L{:.2},{:.2}", p.x, p.y);
        } else {
            let c1 = prev.position + out;
            let c2 = p + inc;
            let _ = write!(
                data,
                "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                c1.x, c1.y, c2.x, c2.y, p.x, p.y
            );
        }
    }

    if closed && !points.is_empty() {
        data.push_str(" Z");
    }
    data
}
