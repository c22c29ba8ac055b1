//! Draws one frame of the board from a [`SnakeSnapshot`].
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path},
    Color, Point, Rectangle, Renderer, Size, Theme,
};

use crate::{
    app::Message,
    models::snake::snake_game::{Cell, GameMode, SnakeSnapshot},
};

/// Rings used to fake the radial background gradient.
const BACKGROUND_RINGS: u16 = 12;
/// Radius where the background gradient starts.
const INNER_RADIUS: f32 = 50.0;

const FOOD: Color = Color::from_rgb(1.0, 1.0, 0.0);
const BLUE_HEAD: Color = Color::from_rgb(0.0, 0.0, 1.0);
const BLUE_BODY: Color = Color::from_rgb(0.4, 0.4, 1.0);
const RED_HEAD: Color = Color::from_rgb(1.0, 0.0, 0.0);
const RED_BODY: Color = Color::from_rgb(1.0, 0.4, 0.4);

#[derive(Debug)]
pub struct SnakeCanvas {
    snapshot: SnakeSnapshot,
    hue: u16,
    flashing: bool,
}

impl SnakeCanvas {
    #[must_use]
    pub fn new(snapshot: SnakeSnapshot, hue: u16, flashing: bool) -> Self {
        Self {
            snapshot,
            hue,
            flashing,
        }
    }

    fn draw_background(&self, frame: &mut Frame, size: Size) {
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let inner = hsl(self.hue, 1.0, 0.3);
        let outer = hsl((self.hue + 120) % 360, 1.0, 0.1);
        frame.fill_rectangle(Point::ORIGIN, size, outer);
        // outermost ring first so the inner ones paint over it
        for step in (0..=BACKGROUND_RINGS).rev() {
            let t = f32::from(step) / f32::from(BACKGROUND_RINGS);
            let radius = INNER_RADIUS + t * (size.width - INNER_RADIUS);
            frame.fill(&Path::circle(center, radius), lerp(inner, outer, t));
        }
    }

    fn draw_snake(frame: &mut Frame, cells: &[Cell], tile: f32, head: Color, body: Color) {
        for (i, cell) in cells.iter().enumerate() {
            draw_circle(frame, *cell, tile, if i == 0 { head } else { body });
        }
    }
}

impl canvas::Program<Message> for SnakeCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.size();
        let mut frame = Frame::new(renderer, size);
        let cells_per_side = u16::try_from(self.snapshot.board_size).map_or(1.0, f32::from);
        let tile = size.width / cells_per_side;

        self.draw_background(&mut frame, size);
        draw_circle(&mut frame, self.snapshot.food, tile, FOOD);
        Self::draw_snake(
            &mut frame,
            &self.snapshot.snake_one,
            tile,
            BLUE_HEAD,
            BLUE_BODY,
        );
        if self.snapshot.mode == GameMode::Multi {
            Self::draw_snake(
                &mut frame,
                &self.snapshot.snake_two,
                tile,
                RED_HEAD,
                RED_BODY,
            );
        }
        if self.flashing {
            frame.fill_rectangle(Point::ORIGIN, size, Color::from_rgba(1.0, 1.0, 1.0, 0.6));
        }
        vec![frame.into_geometry()]
    }
}

fn draw_circle(frame: &mut Frame, cell: Cell, tile: f32, color: Color) {
    frame.fill(&Path::circle(cell_center(cell, tile), tile / 2.5), color);
}

#[allow(clippy::cast_precision_loss)]
fn cell_center(cell: Cell, tile: f32) -> Point {
    Point::new(
        cell.x as f32 * tile + tile / 2.0,
        cell.y as f32 * tile + tile / 2.0,
    )
}

fn lerp(from: Color, to: Color, t: f32) -> Color {
    Color::from_rgb(
        from.r + (to.r - from.r) * t,
        from.g + (to.g - from.g) * t,
        from.b + (to.b - from.b) * t,
    )
}

/// Converts hue in degrees, saturation and lightness in `0.0..=1.0` to a color.
fn hsl(hue: u16, saturation: f32, lightness: f32) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = f32::from(hue % 360) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match hue % 360 / 60 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    Color::from_rgb(r + m, g + m, b + m)
}
