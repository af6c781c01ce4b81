// Renders three procedural textures side by side into texture.png:
// a ridged multifractal terrain, turbulence marble and voronoi cells.
// It's just to demonstrate how to use this library.
use procshade::{
    cell::cell_noise_color,
    improved_perlin::ImprovedPerlin,
    musgrave::{Fractal, FractalKind, FractalParams, Musgrave},
    turbulence::Turbulence,
    voronoi::{DistanceMetric, Voronoi, VoronoiFeature},
    NoiseGenerator, RgbD, Vec3d,
};
use rayon::prelude::*;

const PANEL_SIZE: usize = 512;
const PANELS: usize = 3;

struct Textures<'a> {
    terrain: Fractal<'a, ImprovedPerlin>,
    marble: Turbulence,
    cells: Voronoi,
    crackle: Voronoi,
}

impl Textures<'_> {
    fn terrain(&self, p: Vec3d) -> RgbD {
        let height = (self.terrain.evaluate(p * 4.0) * 0.5).clamp(0.0, 1.0);
        let low = RgbD::new(0.1, 0.25, 0.1);
        let high = RgbD::new(0.9, 0.9, 0.95);
        low.lerp(high, height)
    }

    fn marble(&self, p: Vec3d) -> RgbD {
        let t = self.marble.evaluate(&ImprovedPerlin, p * 6.0);
        let v = 0.5 + 0.5 * (p.x * 20.0 + t * 12.0).sin();
        RgbD::new(0.95, 0.93, 0.9).lerp(RgbD::new(0.2, 0.2, 0.3), v.powf(3.0))
    }

    fn cells(&self, p: Vec3d) -> RgbD {
        let p = p * 8.0;
        let nearest = self.cells.features(p);
        let base = nearest.point(0).map_or(RgbD::ZERO, cell_noise_color);
        base * self.crackle.evaluate(p)
    }

    fn shade(&self, panel: usize, p: Vec3d) -> RgbD {
        match panel {
            0 => self.terrain(p),
            1 => self.marble(p),
            _ => self.cells(p),
        }
    }
}

// I have no idea what the parameters of png mean, but i guess this works for now
fn save_image(path: &std::path::Path, buffer: &[u8], width: u32, height: u32) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(&mut writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_gamma(png::ScaledFloat::new(1.0 / 2.2));

    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(buffer).unwrap();
}

fn main() {
    let basis = ImprovedPerlin::new();
    let terrain = FractalParams {
        h: 0.9,
        lacunarity: 2.1,
        octaves: 7.0,
        offset: 1.0,
        gain: 2.0,
        kind: FractalKind::RidgedMultiFractal,
    };
    let textures = Textures {
        terrain: Fractal::new(&terrain, &basis).unwrap(),
        marble: Turbulence::new(6, 1.0, true).unwrap(),
        cells: Voronoi::new(VoronoiFeature::F1, DistanceMetric::Euclidean).unwrap(),
        crackle: Voronoi::new(VoronoiFeature::Crackle, DistanceMetric::Euclidean).unwrap(),
    };

    let width = PANEL_SIZE * PANELS;
    let height = PANEL_SIZE;
    let mut image: Vec<u8> = vec![0; 3 * width * height];

    image
        .par_chunks_mut(3 * width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.chunks_mut(3).enumerate() {
                let panel = x / PANEL_SIZE;
                let u = (x % PANEL_SIZE) as f64 / PANEL_SIZE as f64;
                let v = y as f64 / PANEL_SIZE as f64;
                let color = textures.shade(panel, Vec3d::new(u, v, 0.5));

                pixel[0] = (color.x * 255.0).clamp(0.0, 255.0).floor() as u8;
                pixel[1] = (color.y * 255.0).clamp(0.0, 255.0).floor() as u8;
                pixel[2] = (color.z * 255.0).clamp(0.0, 255.0).floor() as u8;
            }
        });

    save_image(
        std::path::Path::new("texture.png"),
        &image,
        width as u32,
        height as u32,
    );
    println!("Wrote texture.png ({width}x{height})");
}
