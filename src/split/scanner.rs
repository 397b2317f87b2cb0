use crate::attribute_lists::AttributeEntry;
use crate::core::{HistogramPair, NodeContext};
use crate::error::{ConsistencyError, SliqError};
use crate::split::split_criteria::SplitCriterion;
use crate::split::{CancellationToken, SplitTest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Start,
    Scanning,
    Done,
}

/// Counters collected while scanning one attribute list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub records: usize,
    pub distinct_values: usize,
    pub candidates: usize,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub split: Option<SplitTest>,
    pub summary: ScanSummary,
}

/// Single pass over one sorted attribute list.
///
/// Every record is moved from the right histogram to the left one. Each time
/// the value strictly increases, the records moved so far are exactly those
/// with `value <= previous`, so the pair is scored as the candidate threshold
/// `previous`. The first distinct value is never a candidate (the left side
/// would be empty) and neither is the maximum (the right side would be empty),
/// and equal values are never separated.
pub struct SplitScanner<'a> {
    attribute: &'a str,
    context: &'a NodeContext,
    criterion: &'a dyn SplitCriterion,
    state: ScanState,
    pair: HistogramPair,
    previous: Option<f64>,
    best: Option<(f64, f64)>,
    summary: ScanSummary,
}

impl<'a> SplitScanner<'a> {
    pub fn new(
        attribute: &'a str,
        context: &'a NodeContext,
        criterion: &'a dyn SplitCriterion,
    ) -> Self {
        Self {
            attribute,
            context,
            criterion,
            state: ScanState::Start,
            pair: HistogramPair::new(context.root()),
            previous: None,
            best: None,
            summary: ScanSummary::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn pair(&self) -> &HistogramPair {
        &self.pair
    }

    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    /// Consumes the next entry of the list.
    pub fn push(&mut self, entry: AttributeEntry) -> Result<(), SliqError> {
        if self.state == ScanState::Done {
            return Err(SliqError::InvalidParameter(format!(
                "scan of '{}' already finished",
                self.attribute
            )));
        }
        self.state = ScanState::Scanning;

        let value = entry.value;
        if value.is_nan() {
            return Err(SliqError::parse(
                self.attribute,
                self.summary.records + 1,
                format!("rid {} has no numeric value", entry.rid),
            ));
        }

        match self.previous {
            None => {
                self.previous = Some(value);
                self.summary.distinct_values = 1;
            }
            Some(previous) if value < previous => {
                return Err(ConsistencyError::UnsortedAttributeList {
                    attribute: self.attribute.to_string(),
                    previous,
                    current: value,
                }
                .into());
            }
            Some(previous) if value > previous => {
                self.evaluate(previous);
                self.previous = Some(value);
                self.summary.distinct_values += 1;
            }
            Some(_) => {}
        }

        let class = self
            .context
            .class_index()
            .class_of(entry.rid)
            .ok_or_else(|| ConsistencyError::UnknownRid {
                attribute: self.attribute.to_string(),
                rid: entry.rid,
            })?;
        self.pair.move_to_left(class)?;
        self.summary.records += 1;
        Ok(())
    }

    fn evaluate(&mut self, threshold: f64) {
        let entropy = self.criterion.split_impurity(&self.pair);
        self.summary.candidates += 1;
        if self.best.is_none_or(|(_, best)| entropy < best) {
            self.best = Some((threshold, entropy));
        }
    }

    /// Ends the scan. The pending boundary at the maximum value is dropped.
    pub fn finish(&mut self) -> Option<SplitTest> {
        self.state = ScanState::Done;
        self.best
            .map(|(threshold, entropy)| SplitTest::new(self.attribute, threshold, entropy))
    }
}

/// Scans `entries` to completion and returns the attribute's best split, if any.
pub fn scan_attribute<I>(
    attribute: &str,
    entries: I,
    context: &NodeContext,
    criterion: &dyn SplitCriterion,
    cancel: &CancellationToken,
) -> Result<ScanOutcome, SliqError>
where
    I: IntoIterator<Item = Result<AttributeEntry, SliqError>>,
{
    let mut scanner = SplitScanner::new(attribute, context, criterion);
    for entry in entries {
        if cancel.is_cancelled() {
            return Err(SliqError::Cancelled {
                attribute: attribute.to_string(),
            });
        }
        scanner.push(entry?)?;
    }
    let split = scanner.finish();
    Ok(ScanOutcome {
        split,
        summary: scanner.summary(),
    })
}
