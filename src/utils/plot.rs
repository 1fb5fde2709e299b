use plotters::prelude::*;
use std::path::Path;

use crate::error::{CropError, Result};
use crate::training::history::EvaluationHistory;

fn plot_err<E: std::fmt::Display>(e: E) -> CropError {
    CropError::Plot(e.to_string())
}

/// Draw one bar per candidate with its held-out accuracy, as a PNG at `path`.
pub fn create_plot(history: &EvaluationHistory, path: &Path) -> Result<()> {
    if history.is_empty() {
        return Err(CropError::NoCandidates);
    }
    let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let n = history.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Model Accuracy Comparison", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..n, 0f64..1f64)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("Accuracy")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(history.iter().enumerate().map(|(i, (_, accuracy))| {
            let x = i as f64;
            Rectangle::new([(x + 0.15, 0.0), (x + 0.85, accuracy)], BLUE.mix(0.7).filled())
        }))
        .map_err(plot_err)?;

    // labels sit just above each bar, capped so the top bar stays inside the chart
    chart
        .draw_series(history.iter().enumerate().map(|(i, (kind, accuracy))| {
            Text::new(
                format!("{} ({:.2}%)", kind.name(), accuracy * 100.0),
                (i as f64 + 0.15, (accuracy + 0.04).min(0.97)),
                ("sans-serif", 16).into_font(),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::ClassifierKind;

    #[test]
    fn empty_history_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_plot(&EvaluationHistory::default(), &dir.path().join("chart.png")).unwrap_err();
        assert!(matches!(err, CropError::NoCandidates));
    }

    #[test]
    fn draws_a_bar_per_candidate() {
        let mut history = EvaluationHistory::default();
        for (kind, accuracy) in ClassifierKind::PRIORITY.into_iter().zip([0.91, 0.99, 0.99, 0.97]) {
            history.record(kind, accuracy);
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        create_plot(&history, &path).unwrap();
        let written = std::fs::metadata(&path).unwrap();
        assert!(written.is_file());
        assert!(written.len() > 0);
    }
}
