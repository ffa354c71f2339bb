//! `tracksim predict`

use std::path::Path;

use tracksim_core::config::TracksimConfig;
use tracksim_core::errors::PipelineError;
use tracksim_core::traits::RatingSource;
use tracksim_core::types::PredictionRequest;
use tracksim_engine::{PredictorOptions, RatingIndex, RatingPredictor};
use tracksim_storage::{CsvPredictionWriter, SqliteSimilarityLookup};

use super::open_existing;

pub fn run(config: &TracksimConfig, holdout: bool) -> Result<(), PipelineError> {
    let db = open_existing(config)?;
    let (by_item, by_user) = RatingIndex::build_pair(&db.training_ratings()?);

    let requests: Vec<PredictionRequest> = if holdout {
        db.holdout_sample(config.evaluation.effective_holdout_stride())?
            .into_iter()
            .map(|r| PredictionRequest::new(r.user_id, r.item_id))
            .collect()
    } else {
        db.prediction_requests()?
    };

    let lookup =
        SqliteSimilarityLookup::new(&db, config.prediction.effective_similarity_cache_capacity());
    let predictor = RatingPredictor::new(
        &lookup,
        &by_user,
        &by_item,
        PredictorOptions::from_config(&config.prediction),
    );

    let output = config.prediction.effective_output_path();
    let mut sink = CsvPredictionWriter::create(Path::new(output))?;
    let stats = predictor.predict_all(&requests, &mut sink)?;

    println!(
        "Wrote {} predictions to {output} ({} item-based, {} user-based, {} without signal)",
        stats.emitted, stats.item_based, stats.user_based, stats.no_signal
    );
    Ok(())
}
