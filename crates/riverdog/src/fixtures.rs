//! Small hand-drawn images shared by the unit tests.

use image::{Rgb, RgbImage};
use crate::types::{Point, BLACK, WHITE};

pub const RIVER_BLUE: Rgb<u8> = Rgb([40, 90, 160]);
pub const RIVER_TEAL: Rgb<u8> = Rgb([50, 100, 170]);
pub const BRICK_RED: Rgb<u8> = Rgb([200, 30, 30]);

/// `.` is white background, `#` black, `a`/`b` two further region colors.
pub fn regions(rows: &[&str]) -> RgbImage {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    RgbImage::from_fn(width, height, |x, y| {
        match rows[y as usize].as_bytes()[x as usize] {
            b'.' => WHITE,
            b'#' => BLACK,
            b'a' => Rgb([200, 0, 0]),
            b'b' => Rgb([0, 0, 200]),
            other => panic!("unknown fixture pixel {:?}", other as char),
        }
    })
}

pub fn points(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point { x, y }).collect()
}

/// Irregular blob with a notch and a one-pixel spur.
pub const BLOB: [&str; 8] = [
    "..##....",
    "..##....",
    "..######",
    "..###.##",
    "######..",
    "######..",
    "..#.##..",
    "..#.##..",
];

/// Boundary of [`BLOB`] in trace order.
pub const BLOB_BOUNDARY: [(i32, i32); 26] = [
    (0, 5), (0, 4), (1, 4), (2, 3), (2, 2), (2, 1), (2, 0), (3, 0), (3, 1),
    (4, 2), (5, 2), (6, 2), (7, 2), (7, 3), (6, 3), (5, 4), (5, 5), (5, 6),
    (5, 7), (4, 7), (4, 6), (3, 5), (2, 6), (2, 7), (2, 6), (1, 5),
];

/// Horizontal lines of 7, 5 and 3 pixels on rows 1, 3 and 5. The scan meets
/// them shortest first; their perimeters are 12, 8 and 4.
pub const THREE_LINES: [&str; 7] = [
    "........",
    "#######.",
    "........",
    "#####...",
    "........",
    "###.....",
    "........",
];

/// Two 2x2 squares with equal perimeters; the left one is met first.
pub const TWO_SQUARES: [&str; 5] = [
    "........",
    ".##.....",
    ".##..##.",
    ".....##.",
    "........",
];

/// Paints every black pixel of `regions` on row `row` with `color`.
pub fn paint_row(image: &mut RgbImage, regions: &RgbImage, row: u32, color: Rgb<u8>) {
    for x in 0..regions.width() {
        if *regions.get_pixel(x, row) == BLACK {
            image.put_pixel(x, row, color);
        }
    }
}
