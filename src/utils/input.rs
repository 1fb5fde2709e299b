use std::io::{self, BufRead, Write};

use crate::data::features::{FeatureVector, FEATURE_COUNT};
use crate::model::recommender::CropRecommender;

const FEATURE_PROMPTS: [&str; FEATURE_COUNT] = [
    "nitrogen content (N): ",
    "phosphorous content (P): ",
    "potassium content (K): ",
    "temperature (C): ",
    "humidity (%): ",
    "ph: ",
    "rainfall (mm): ",
];

/// Outcome of asking the user for one full set of measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureInput {
    Values(FeatureVector),
    Invalid,
    /// Input stream ended.
    Closed,
}

/// Print `prompt` and read one trimmed line; `None` at end of input.
pub fn get_input<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for the seven measurements, stopping at the first value that is not a number.
pub fn read_features<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<FeatureInput> {
    let mut values = [0.0; FEATURE_COUNT];
    for (slot, prompt) in values.iter_mut().zip(FEATURE_PROMPTS) {
        let Some(text) = get_input(input, output, prompt)? else {
            return Ok(FeatureInput::Closed);
        };
        match text.parse::<f64>() {
            Ok(num) => *slot = num,
            Err(_) => {
                writeln!(output, "Invalid input. Please enter numbers.")?;
                return Ok(FeatureInput::Invalid);
            }
        }
    }
    Ok(FeatureInput::Values(FeatureVector::from_array(values)))
}

/// Keep offering predictions until the user answers anything but `y`.
pub fn prediction_loop<R: BufRead, W: Write>(
    recommender: &CropRecommender,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        let Some(choice) = get_input(input, output, "\nDo you want to predict a crop? (y/n): ")? else {
            break;
        };
        if !choice.eq_ignore_ascii_case("y") {
            break;
        }

        writeln!(output, "\n--- Predict Custom Crop ---")?;
        match read_features(input, output)? {
            FeatureInput::Values(features) => match recommender.recommend(&features) {
                Ok(crop) => writeln!(output, "Recommended Crop: {}", crop.to_uppercase())?,
                Err(e) => writeln!(output, "Prediction failed: {}", e)?,
            },
            FeatureInput::Invalid => continue,
            FeatureInput::Closed => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::trainer::tests::separable_dataset;
    use crate::training::trainer::{train_model, TrainConfig};
    use std::io::Cursor;

    fn recommender() -> CropRecommender {
        let outcome = train_model(&separable_dataset(20), &TrainConfig::default()).unwrap();
        CropRecommender::new(outcome.model, outcome.scaler).unwrap()
    }

    #[test]
    fn reads_all_seven_values() {
        let mut input = Cursor::new("90\n42\n43\n20.8\n82\n6.5\n202.9\n");
        let mut output = Vec::new();
        let result = read_features(&mut input, &mut output).unwrap();
        assert_eq!(
            result,
            FeatureInput::Values(FeatureVector::from_array([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]))
        );
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("nitrogen content (N): "));
        assert!(shown.ends_with("rainfall (mm): "));
    }

    #[test]
    fn stops_at_first_non_number() {
        let mut input = Cursor::new("90\nlots\n43\n");
        let mut output = Vec::new();
        assert_eq!(read_features(&mut input, &mut output).unwrap(), FeatureInput::Invalid);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Invalid input. Please enter numbers."));
        assert!(!shown.contains("potassium"));
    }

    #[test]
    fn loop_recovers_from_bad_input_and_predicts() {
        let recommender = recommender();
        let script = "y\n1\nx\nY\n50.5\n51.5\n52.5\n53.5\n54.5\n55.5\n56.5\nn\n";
        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        prediction_loop(&recommender, &mut input, &mut output).unwrap();

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Invalid input. Please enter numbers."));
        assert!(shown.contains("Recommended Crop: RICE"));
        assert_eq!(shown.matches("Do you want to predict a crop?").count(), 3);
    }

    #[test]
    fn loop_ends_at_end_of_input() {
        let recommender = recommender();
        let mut input = Cursor::new("y\n90\n");
        let mut output = Vec::new();
        prediction_loop(&recommender, &mut input, &mut output).unwrap();
        assert!(!String::from_utf8(output).unwrap().contains("Recommended Crop"));
    }
}
