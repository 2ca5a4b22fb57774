// Grid planning and block iteration: derives block geometry from the surface
// size, then walks the grid column-major handing each block's fill and
// rotation to a paint callback.
use rand::Rng;
use thiserror::Error;

use crate::palette::{self, Fill};
use crate::rng::random_int;
use crate::settings::Settings;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("cannot tile the surface with {0} blocks per row")]
    DegenerateGrid(u32),
}

/// Per-render geometry. Recomputed on every render request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub block_width: f64,
    pub block_height: f64,
    pub total_rows: f64,
    pub total_columns: f64,
    pub rotation_max_randomness: i64,
}

pub fn plan(
    surface_width: f64,
    surface_height: f64,
    blocks_per_row: u32,
    rotation_max_randomness: i64,
) -> Result<GridPlan, PlanError> {
    if blocks_per_row == 0 {
        return Err(PlanError::DegenerateGrid(blocks_per_row));
    }
    let block_height = surface_height / blocks_per_row as f64;
    let block_width = surface_width / blocks_per_row as f64;
    // Row/column counts come from the block size, not from blocks_per_row
    // directly, so non-integer surface dimensions truncate consistently.
    let total_rows = surface_height / block_height;
    let total_columns = surface_width / block_width;
    Ok(GridPlan {
        block_width,
        block_height,
        total_rows,
        total_columns,
        rotation_max_randomness,
    })
}

/// Walk the grid column-major (all rows of column 0, then column 1, ...) and
/// invoke `paint` for every block whose fill resolves. Loop bounds are the
/// real-valued totals; a fractional count truncates naturally.
pub fn render<R, F>(plan: &GridPlan, settings: &Settings, rng: &mut R, mut paint: F)
where
    R: Rng + ?Sized,
    F: FnMut(Fill, f64, f64, f64, f64, f64),
{
    let mut i: u64 = 0;
    while (i as f64) < plan.total_columns {
        let x = i as f64 * plan.block_width;
        let mut j: u64 = 0;
        while (j as f64) < plan.total_rows {
            let y = j as f64 * plan.block_height;
            if let Some(fill) = palette::resolve(settings, rng) {
                let rotation_deg = if plan.rotation_max_randomness > 0 {
                    random_int(rng, plan.rotation_max_randomness as f64) as f64
                } else {
                    0.0
                };
                paint(
                    fill,
                    x,
                    y,
                    plan.block_width,
                    plan.block_height,
                    rotation_deg,
                );
            }
            j += 1;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Mode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plan_even_tiling() {
        let plan = plan(500.0, 500.0, 50, 0).unwrap();
        assert_eq!(plan.block_width, 10.0);
        assert_eq!(plan.block_height, 10.0);
        assert_eq!(plan.total_rows, 50.0);
        assert_eq!(plan.total_columns, 50.0);
    }

    #[test]
    fn test_plan_zero_blocks_per_row_fails() {
        assert_eq!(plan(500.0, 500.0, 0, 0), Err(PlanError::DegenerateGrid(0)));
    }

    #[test]
    fn test_render_is_column_major() {
        let plan = plan(2.0, 2.0, 2, 0).unwrap();
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut calls = Vec::new();
        render(&plan, &settings, &mut rng, |_, x, y, _, _, _| {
            calls.push((x, y));
        });
        assert_eq!(calls, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn test_render_call_count_truncates_fractional_totals() {
        // 5 / 2 blocks: 2.5-wide blocks, totals of exactly 2.0 per axis.
        let plan = plan(5.0, 5.0, 2, 0).unwrap();
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(10);
        let mut count = 0;
        render(&plan, &settings, &mut rng, |_, _, _, _, _, _| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_render_unknown_mode_paints_nothing() {
        let plan = plan(100.0, 100.0, 10, 0).unwrap();
        let mut settings = Settings::default();
        settings.mode = Mode::Other("BOGUS".to_string());
        let mut rng = StdRng::seed_from_u64(11);
        let mut count = 0;
        render(&plan, &settings, &mut rng, |_, _, _, _, _, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_render_zero_jitter_is_idempotent() {
        let plan = plan(40.0, 40.0, 4, 0).unwrap();
        let mut settings = Settings::default();
        settings.mode = Mode::FromUi;
        settings.red_value = 1;
        settings.green_value = 2;
        settings.blue_value = 3;
        let mut rng = StdRng::seed_from_u64(12);
        let mut first = Vec::new();
        render(&plan, &settings, &mut rng, |fill, x, y, _, _, _| {
            first.push((fill, x, y));
        });
        let mut second = Vec::new();
        render(&plan, &settings, &mut rng, |fill, x, y, _, _, _| {
            second.push((fill, x, y));
        });
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
    }

    #[test]
    fn test_render_samples_rotation_when_enabled() {
        let plan = plan(10.0, 10.0, 1, 45).unwrap();
        let mut settings = Settings::default();
        settings.mode = Mode::FromUi;
        let mut rng = StdRng::seed_from_u64(13);
        let mut rotations = Vec::new();
        for _ in 0..200 {
            render(&plan, &settings, &mut rng, |_, _, _, _, _, rot| {
                rotations.push(rot);
            });
        }
        assert!(rotations.iter().all(|r| (0.0..=45.0).contains(r)));
        assert!(rotations.iter().any(|&r| r > 0.0));
    }
}
