use orbiter_orbit::{OrbitParameters, OrbitState};
use orbiter_path::{OrbitPath, PathStyle};
use std::io;

const PALETTE: [[u8; 3]; 5] = [
    [0, 0, 0],       // background, rgb(0, 0, 0)
    [31, 119, 180],  // path, rgb(31, 119, 180)
    [255, 127, 14],  // current, rgb(255, 127, 14)
    [44, 160, 44],   // start, rgb(44, 160, 44)
    [214, 39, 40],   // center, rgb(214, 39, 40)
];

const SIZE: usize = 512;
const SEGMENTS: u32 = 2048;
const MARKER: isize = 4;

fn main() -> io::Result<()> {
    let params = OrbitParameters::new(1000.0, 800.0)
        .map_err(io::Error::other)?
        .with_inclination(30.0)
        .with_rotation_angle(20.0)
        .with_starting_angle(45.0);
    let mut state = OrbitState::init(&params);
    state.current_angle = 200f32.to_radians();
    let style = PathStyle::new(SEGMENTS, bevy_color::Color::WHITE).map_err(io::Error::other)?;
    let Some(path) = OrbitPath::trace(&params, &state, bevy_math::Vec3::ZERO, &style) else {
        return Ok(());
    };

    // top-down view of the X-Z plane, with a bit of margin
    let scale = SIZE as f32 / (params.semi_major_axis.max(params.semi_minor_axis) * 2.2);
    let to_px = |v: bevy_math::Vec3| {
        (
            (v.x * scale + SIZE as f32 / 2.0) as isize,
            (v.z * scale + SIZE as f32 / 2.0) as isize,
        )
    };
    let mut image = [0u8; SIZE * SIZE];
    let mut plot = |(x, y): (isize, isize), color: u8| {
        if (0..SIZE as isize).contains(&x) && (0..SIZE as isize).contains(&y) {
            image[y as usize * SIZE + x as usize] = color;
        }
    };
    for &p in &path.points {
        plot(to_px(p), 1);
    }
    for (pos, color) in [
        (path.markers.current, 2),
        (path.markers.start, 3),
        (path.markers.center, 4),
    ] {
        let (cx, cy) = to_px(pos);
        for dy in -MARKER..=MARKER {
            for dx in -MARKER..=MARKER {
                plot((cx + dx, cy + dy), color);
            }
        }
    }

    let file = std::fs::File::create("trace.png")?;
    let mut encoder = png::Encoder::new(file, SIZE as u32, SIZE as u32);
    encoder.set_palette(PALETTE.as_flattened());
    encoder.set_color(png::ColorType::Indexed);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image)?;
    writer.finish()?;
    Ok(())
}
