// End-to-end: plan the grid, render it, and check what landed on the
// surface.
use blockfield::grid;
use blockfield::settings::{Mode, Settings};
use blockfield::surface::{Pixel, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn from_ui_zero_jitter_paints_a_uniform_grid() {
    let mut settings = Settings::default();
    settings.mode = Mode::FromUi;
    settings.red_value = 10;
    settings.green_value = 20;
    settings.blue_value = 30;
    settings.blocks_per_row = 4;

    let mut surface = Surface::new(8, 8);
    let plan = grid::plan(8.0, 8.0, settings.blocks_per_row, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    grid::render(&plan, &settings, &mut rng, |fill, x, y, w, h, rotation| {
        surface.fill_rect(&fill, x, y, w, h, rotation)
    });

    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(surface.pixel(x, y), Some(Pixel { r: 10, g: 20, b: 30 }));
        }
    }
}

#[test]
fn unknown_mode_leaves_the_surface_untouched() {
    let mut settings = Settings::default();
    settings.mode = Mode::Other("BOGUS".to_string());
    settings.blocks_per_row = 4;

    let mut surface = Surface::new(8, 8);
    let plan = grid::plan(8.0, 8.0, settings.blocks_per_row, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(43);
    grid::render(&plan, &settings, &mut rng, |fill, x, y, w, h, rotation| {
        surface.fill_rect(&fill, x, y, w, h, rotation)
    });

    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(surface.pixel(x, y), Some(Pixel::BLACK));
        }
    }
}

#[test]
fn default_mode_covers_the_surface_with_random_fills() {
    let mut settings = Settings::default();
    settings.mode = Mode::Default;
    settings.blocks_per_row = 4;

    let mut surface = Surface::new(8, 8);
    let plan = grid::plan(8.0, 8.0, settings.blocks_per_row, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(44);
    grid::render(&plan, &settings, &mut rng, |fill, x, y, w, h, rotation| {
        surface.fill_rect(&fill, x, y, w, h, rotation)
    });

    // Hex fills are opaque; 16 random blocks all coming out #000000 would
    // mean the surface was never painted.
    let mut painted = 0;
    for y in 0..8 {
        for x in 0..8 {
            if surface.pixel(x, y) != Some(Pixel::BLACK) {
                painted += 1;
            }
        }
    }
    assert!(painted > 0);
}
