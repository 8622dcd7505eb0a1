use crate::{
    cards::CardExtractor,
    cnbc::{MarketExtractor, NewsExtractor},
    report::{Event, Reporter},
    sink::{self, SinkOutcome},
    Extractor, ExtractorError, Layout, Located, Record, RecordKind,
};
use scraper::Html;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RAW_DATA_DIR: &str = "raw_data";
pub const PROCESSED_DATA_DIR: &str = "processed_data";
pub const DOCUMENT_FILE_NAME: &str = "web_data.html";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Also extract article cards when the layout describes them.
    pub cards: bool,
}

impl PipelineConfig {
    /// `<root>/raw_data/web_data.html` in, `<root>/processed_data/` out.
    pub fn from_data_root<P: AsRef<Path>>(root: P) -> PipelineConfig {
        let root = root.as_ref();
        PipelineConfig {
            input: root.join(RAW_DATA_DIR).join(DOCUMENT_FILE_NAME),
            output_dir: root.join(PROCESSED_DATA_DIR),
            cards: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StageStatus {
    Written { rows: usize },
    NoData,
    Failed(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct StageOutcome {
    pub kind: RecordKind,
    pub records: usize,
    pub path: PathBuf,
    pub status: StageStatus,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stages: Vec<StageOutcome>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.stages
            .iter()
            .any(|s| matches!(s.status, StageStatus::Failed(_)))
    }

    pub fn stage(&self, kind: RecordKind) -> Option<&StageOutcome> {
        self.stages.iter().find(|s| s.kind == kind)
    }
}

pub struct Pipeline<'r> {
    config: PipelineConfig,
    layout: Layout,
    reporter: &'r dyn Reporter,
}

impl<'r> Pipeline<'r> {
    pub fn new(config: PipelineConfig, layout: Layout, reporter: &'r dyn Reporter) -> Self {
        Pipeline {
            config,
            layout,
            reporter,
        }
    }

    pub fn load_document(&self) -> Result<Html, ExtractorError> {
        let path = &self.config.input;
        let bytes = std::fs::read(path).map_err(|source| ExtractorError::DocumentUnavailable {
            path: path.clone(),
            source,
        })?;
        self.reporter.report(Event::DocumentLoaded {
            path: path.clone(),
            bytes: bytes.len(),
        });
        Ok(Html::parse_document(&String::from_utf8_lossy(&bytes)))
    }

    /// Runs every stage against one document. Only a missing document is an
    /// error; stage failures are reported and recorded in the summary.
    pub fn run(&self) -> Result<RunSummary, ExtractorError> {
        let doc = self.load_document()?;
        let mut summary = RunSummary::default();

        let market = MarketExtractor::new(self.layout.market.clone());
        summary.stages.push(self.run_stage(&doc, &market));

        let news = NewsExtractor::new(self.layout.news.clone());
        summary.stages.push(self.run_stage(&doc, &news));

        if self.config.cards {
            match &self.layout.cards {
                Some(spec) => {
                    let cards = CardExtractor::new(spec.clone());
                    summary.stages.push(self.run_stage(&doc, &cards));
                }
                None => self.reporter.report(Event::SpecMissing {
                    kind: RecordKind::Cards,
                }),
            }
        }

        Ok(summary)
    }

    fn run_stage<E: Extractor>(&self, doc: &Html, extractor: &E) -> StageOutcome {
        let kind = <E::Record as Record>::KIND;
        let path = self.config.output_dir.join(kind.file_name());
        debug!(%kind, "Running stage");

        let items = match extractor.locate(doc) {
            Located::Items(items) => items,
            Located::ContainerNotFound => {
                self.reporter.report(Event::ContainerNotFound { kind });
                vec![]
            }
            Located::NoItems => {
                self.reporter.report(Event::NoItems { kind });
                vec![]
            }
        };
        let records: Vec<E::Record> = items.into_iter().map(|i| extractor.extract(i)).collect();
        self.reporter.report(Event::Extracted {
            kind,
            count: records.len(),
        });

        let status = match sink::write(&records, &path, <E::Record as Record>::HEADERS) {
            Ok(SinkOutcome::Written { rows }) => {
                self.reporter.report(Event::Written {
                    kind,
                    path: path.clone(),
                    rows,
                });
                StageStatus::Written { rows }
            }
            Ok(SinkOutcome::NoData) => {
                self.reporter.report(Event::NoData {
                    kind,
                    path: path.clone(),
                });
                StageStatus::NoData
            }
            Err(e) => {
                let error = error_chain(&e);
                self.reporter.report(Event::SinkFailed {
                    kind,
                    path: path.clone(),
                    error: error.clone(),
                });
                StageStatus::Failed(error)
            }
        };

        StageOutcome {
            kind,
            records: records.len(),
            path,
            status,
        }
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn data_root(html: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("No temp dir");
        let raw = dir.path().join(RAW_DATA_DIR);
        fs::create_dir_all(&raw).expect("No raw dir");
        fs::write(raw.join(DOCUMENT_FILE_NAME), html).expect("Write failed");
        dir
    }

    #[test]
    fn test_full_run() {
        let html = fs::read_to_string("tests/htmls/cnbc.html").expect("Invalid file url");
        let root = data_root(&html);
        let config = PipelineConfig::from_data_root(root.path());
        let reporter = RecordingReporter::default();

        let summary = Pipeline::new(config.clone(), Layout::cnbc(), &reporter)
            .run()
            .expect("Run failed");

        assert!(!summary.has_failures());
        assert_eq!(
            summary.stage(RecordKind::Market).map(|s| &s.status),
            Some(&StageStatus::Written { rows: 3 })
        );
        assert_eq!(
            summary.stage(RecordKind::News).map(|s| &s.status),
            Some(&StageStatus::Written { rows: 4 })
        );
        assert_eq!(summary.stage(RecordKind::Cards), None);

        let market = fs::read_to_string(config.output_dir.join("market_data.csv"))
            .expect("Read failed");
        assert_eq!(
            market,
            "Symbol,StockPosition,ChangePct\nDJIA,\"43,487.83\",\nS&P 500,\"5,996.66\",+0.73%\nNASDAQ,\"19,630.20\",-1.12%\n"
        );
    }

    #[test]
    fn test_missing_document_is_fatal() {
        let root = tempfile::tempdir().expect("No temp dir");
        let config = PipelineConfig::from_data_root(root.path());
        let reporter = RecordingReporter::default();

        let result = Pipeline::new(config, Layout::cnbc(), &reporter).run();
        assert!(matches!(
            result,
            Err(ExtractorError::DocumentUnavailable { .. })
        ));
        assert_eq!(reporter.events(), vec![]);
    }

    #[test]
    fn test_invalid_utf8_document_is_not_fatal() {
        let root = data_root("");
        let config = PipelineConfig::from_data_root(root.path());
        let mut html = br#"<div id="market-data-scroll-container"><a class="MarketCard-container"><span class="MarketCard-symbol">CAC</span><span class="MarketCard-stockPosition">caf"#.to_vec();
        html.push(0xE9);
        html.extend_from_slice(b"</span></a></div>");
        fs::write(&config.input, &html).expect("Write failed");
        let reporter = RecordingReporter::default();

        let summary = Pipeline::new(config.clone(), Layout::cnbc(), &reporter)
            .run()
            .expect("Run failed");

        assert_eq!(
            summary.stage(RecordKind::Market).map(|s| &s.status),
            Some(&StageStatus::Written { rows: 1 })
        );
        let market = fs::read_to_string(config.output_dir.join("market_data.csv"))
            .expect("Read failed");
        assert_eq!(market, "Symbol,StockPosition,ChangePct\nCAC,caf\u{FFFD},\n");
    }

    #[test]
    fn test_document_without_containers() {
        let root = data_root("<html><body><p>Access denied</p></body></html>");
        let config = PipelineConfig::from_data_root(root.path());
        let reporter = RecordingReporter::default();

        let summary = Pipeline::new(config.clone(), Layout::cnbc(), &reporter)
            .run()
            .expect("Run failed");

        assert!(summary.stages.iter().all(|s| s.status == StageStatus::NoData));
        assert!(!config.output_dir.join("market_data.csv").exists());
        assert!(!config.output_dir.join("news_data.csv").exists());

        let events = reporter.events();
        assert!(events.contains(&Event::ContainerNotFound {
            kind: RecordKind::Market
        }));
        assert!(events.contains(&Event::NoData {
            kind: RecordKind::News,
            path: config.output_dir.join("news_data.csv"),
        }));
    }

    #[test]
    fn test_empty_news_list_reports_no_items() {
        let root = data_root(r#"<ul class="LatestNews-list"></ul>"#);
        let config = PipelineConfig::from_data_root(root.path());
        let reporter = RecordingReporter::default();

        Pipeline::new(config, Layout::cnbc(), &reporter)
            .run()
            .expect("Run failed");

        assert!(reporter.events().contains(&Event::NoItems {
            kind: RecordKind::News
        }));
    }

    #[test]
    fn test_sink_failure_does_not_stop_other_stage() {
        let html = fs::read_to_string("tests/htmls/cnbc.html").expect("Invalid file url");
        let root = data_root(&html);
        let mut config = PipelineConfig::from_data_root(root.path());
        config.cards = true;
        // A directory where the market CSV should go makes that write fail.
        fs::create_dir_all(config.output_dir.join("market_data.csv")).expect("No dir");
        let reporter = RecordingReporter::default();

        let summary = Pipeline::new(config.clone(), Layout::cnbc(), &reporter)
            .run()
            .expect("Run failed");

        assert!(summary.has_failures());
        assert!(matches!(
            summary.stage(RecordKind::Market).map(|s| &s.status),
            Some(StageStatus::Failed(_))
        ));
        assert_eq!(
            summary.stage(RecordKind::News).map(|s| &s.status),
            Some(&StageStatus::Written { rows: 4 })
        );
        assert_eq!(
            summary.stage(RecordKind::Cards).map(|s| &s.status),
            Some(&StageStatus::NoData)
        );
        assert!(config.output_dir.join("news_data.csv").is_file());
    }

    #[test]
    fn test_cards_without_spec() {
        let root = data_root("<html></html>");
        let mut config = PipelineConfig::from_data_root(root.path());
        config.cards = true;
        let mut layout = Layout::cnbc();
        layout.cards = None;
        let reporter = RecordingReporter::default();

        let summary = Pipeline::new(config, layout, &reporter)
            .run()
            .expect("Run failed");

        assert_eq!(summary.stages.len(), 2);
        assert!(reporter.events().contains(&Event::SpecMissing {
            kind: RecordKind::Cards
        }));
    }
}
