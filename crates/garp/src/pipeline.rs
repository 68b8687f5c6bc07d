//! End-to-end pipeline for one instrument.
//!
//! Stages run strictly in order: normalization, TTM aggregation and
//! unification, daily merge with ratio derivation, projection onto official
//! dates, enrichment. The only fatal condition is a missing EPS field (or
//! invalid input); everything else degrades to undefined values.

use garp_fundamentals::{
    DailyMergedSeries, FinancialHistory, HistoryConfig, NormalizerConfig, RatioConfig, StatementHistory,
    StatementNormalizer, UnifiedSeries,
};
use garp_report::{enrich_all, project, PeBands, ReportingRecord, ValuationSummary};
use garp_traits::{GarpError, PeriodKind, PriceSeries, Result, StatementSource, Symbol};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, info, info_span, warn};

/// Configuration for every pipeline stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Normalizer settings.
    pub normalizer: NormalizerConfig,
    /// Ratio settings.
    pub ratios: RatioConfig,
    /// History table settings.
    pub history: HistoryConfig,
}

impl PipelineConfig {
    /// Parse a configuration from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Everything computed for one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentReport {
    /// Instrument identifier.
    pub symbol: Symbol,
    /// Normalized statements.
    pub statements: StatementHistory,
    /// Sparse merged fundamentals.
    pub unified: UnifiedSeries,
    /// Daily merged series with ratios.
    pub daily: DailyMergedSeries,
    /// Enriched records, one per qualifying official date.
    pub records: Vec<ReportingRecord>,
    /// Solvency history tables.
    pub history: FinancialHistory,
    /// Latest valuation.
    pub summary: ValuationSummary,
    /// PE bands over the daily series.
    pub pe_bands: Option<PeBands>,
}

/// Runs the stages for one instrument.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn normalizer(&self, source: &dyn StatementSource) -> StatementNormalizer {
        let mut config = self.config.normalizer.clone();
        if let Some(rate) = source.spot_rate() {
            config.spot_rate = rate;
        }
        StatementNormalizer::new(config)
    }

    /// Normalize the source's statements.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when no EPS figure exists in either
    /// frequency, or any error raised by the source.
    pub fn statements(&self, source: &dyn StatementSource) -> Result<StatementHistory> {
        let annual = source.statements(PeriodKind::Annual)?;
        let quarterly = source.statements(PeriodKind::Quarterly)?;
        self.normalizer(source).normalize(&annual, &quarterly)
    }

    /// Run every stage.
    ///
    /// # Errors
    ///
    /// Returns an error when the source fails, the instrument has no EPS or
    /// the ratio configuration is invalid.
    pub fn run(&self, source: &dyn StatementSource) -> Result<InstrumentReport> {
        let span = info_span!("pipeline", symbol = source.symbol());
        let _guard = span.enter();

        let prices = source.prices()?;
        if prices.is_empty() {
            warn!("price series is empty; no daily rows or records will be produced");
        }

        let statements = self.statements(source)?;
        let unified = UnifiedSeries::build(&statements);
        let daily = DailyMergedSeries::build(&prices, &unified, &self.config.ratios)?;
        log_undefined_pe(&daily);

        let records = enrich_all(&project(&statements, &prices, &daily), &statements);
        let history = FinancialHistory::build(&statements, &self.config.history);
        let summary = ValuationSummary::build(&records);
        let pe_bands = PeBands::from_daily(&daily);

        info!(
            unified = unified.len(),
            days = daily.len(),
            records = records.len(),
            "pipeline complete"
        );

        Ok(InstrumentReport {
            symbol: source.symbol().to_string(),
            statements,
            unified,
            daily,
            records,
            history,
            summary,
            pe_bands,
        })
    }

    /// Re-enrich previously exported records against the source's statements.
    ///
    /// # Errors
    ///
    /// Returns an error when the statements cannot be normalized.
    pub fn enrich_records(
        &self,
        source: &dyn StatementSource,
        records: &[ReportingRecord],
    ) -> Result<Vec<ReportingRecord>> {
        let statements = self.statements(source)?;
        Ok(enrich_all(records, &statements))
    }

    /// Daily merged series only.
    ///
    /// # Errors
    ///
    /// Returns an error when the source fails or the instrument has no EPS.
    pub fn daily(&self, source: &dyn StatementSource) -> Result<(PriceSeries, DailyMergedSeries)> {
        let prices = source.prices()?;
        let unified = UnifiedSeries::build(&self.statements(source)?);
        let daily = DailyMergedSeries::build(&prices, &unified, &self.config.ratios)?;
        Ok((prices, daily))
    }
}

fn log_undefined_pe(daily: &DailyMergedSeries) {
    let undefined = daily
        .rows()
        .iter()
        .filter(|r| r.fundamentals.is_some() && r.valuation.pe_ratio.is_none())
        .count();
    if undefined > 0 {
        debug!(
            reason = %GarpError::DegenerateDenominator(format!("non-positive TTM EPS on {undefined} days")),
            "PE undefined"
        );
    }
}

/// Run the default pipeline.
///
/// # Errors
///
/// See [`Pipeline::run`].
pub fn analyze(source: &dyn StatementSource, config: &PipelineConfig) -> Result<InstrumentReport> {
    Pipeline::new(config.clone()).run(source)
}
