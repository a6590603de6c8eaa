use super::log::{ProcessLog, SkipReason};
use crate::config::GeneratorConfig;
use crate::docblock::{DocBlockParser, TagLexer};
use crate::errors::GenerateError;
use crate::example::ExampleGenerator;
use crate::invoke::HandlerInvoker;
use crate::matcher::{match_routes, MatchOutcome};
use crate::model::{build_model, EndpointMetadata, EndpointModel};
use crate::output::{
    markdown_page_name, render_collection, render_group_page, RenderConfig, StagedDir, StagedFile,
};
use crate::route::HostAdapter;
use crate::strategies::{apply_fragment, StrategyContext, StrategySet};
use std::sync::Arc;
use tracing::debug;

/// Everything a finished (or partially finished) run produced.
#[derive(Debug)]
pub struct RunReport {
    pub model: EndpointModel,
    pub log: ProcessLog,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.log.processed_count()
    }

    pub fn skipped(&self) -> usize {
        self.log.skipped_count()
    }
}

/// The pipeline driver.
///
/// Owns the strategy chain, the doc-block parser, the optional handler
/// invoker, and during a run the single RNG stream and the append-only
/// process log. Routes are processed strictly sequentially; the driver
/// alone decides failure severity.
pub struct Generator {
    config: GeneratorConfig,
    strategies: StrategySet,
    parser: Box<dyn DocBlockParser>,
    invoker: Option<Arc<dyn HandlerInvoker>>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            strategies: StrategySet::default_chain(),
            parser: Box::new(TagLexer),
            invoker: None,
        }
    }

    pub fn with_strategies(mut self, strategies: StrategySet) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn DocBlockParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_invoker(mut self, invoker: Arc<dyn HandlerInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Run extraction only: match, execute strategies per route, build the
    /// grouped model. No files are touched.
    pub fn extract(&self, host: &dyn HostAdapter) -> Result<RunReport, GenerateError> {
        self.strategies.validate()?;
        let rules = self.config.compile_rules()?;
        // reject a bad base URL before any route is processed
        self.config.parsed_base_url()?;

        let routes = host.list_routes();
        let outcomes = match_routes(&routes, &rules);

        let mut examples = ExampleGenerator::new(self.config.faker_seed);
        let mut log = ProcessLog::new();
        let mut endpoints = Vec::new();

        for outcome in outcomes {
            let matched = match outcome {
                MatchOutcome::Included(matched) => matched,
                MatchOutcome::Excluded(route) => {
                    log.skipped(&route, SkipReason::ExcludedByFilter);
                    continue;
                }
            };
            let route = &matched.route;
            let rule = &rules[matched.rule];

            let Some(capabilities) = host.resolve_handler(&route.handler) else {
                log.skipped(route, SkipReason::UnresolvableHandler);
                continue;
            };
            let doc = self.parser.parse(&route.doc_block);
            if doc.has_tag("hideFromAPIDocumentation") {
                log.skipped(route, SkipReason::Hidden);
                continue;
            }

            let ctx = StrategyContext {
                route,
                doc: &doc,
                capabilities: &capabilities,
                apply: &rule.apply,
                config: &self.config,
                invoker: self.invoker.as_ref(),
            };
            match self.run_strategies(&ctx, &mut examples) {
                Ok(metadata) => {
                    endpoints.push(metadata);
                    log.processed(route);
                }
                Err(reason) => log.skipped(route, SkipReason::Strategy(reason)),
            }
        }

        let model = build_model(endpoints, self.config.group_sort);
        Ok(RunReport { model, log })
    }

    fn run_strategies(
        &self,
        ctx: &StrategyContext<'_>,
        examples: &mut ExampleGenerator,
    ) -> Result<EndpointMetadata, String> {
        let mut metadata = EndpointMetadata::new(ctx.route.methods.clone(), &ctx.route.uri);
        for strategy in self.strategies.strategies() {
            match strategy.contribute(ctx, &metadata, examples) {
                Ok(Some(fragment)) => apply_fragment(&mut metadata, fragment),
                Ok(None) => {
                    debug!(strategy = strategy.name(), route = %ctx.route.uri, "no contribution")
                }
                Err(err) => return Err(err.to_string()),
            }
        }
        if metadata.group.is_empty() {
            // custom chains without a metadata strategy still satisfy the
            // non-empty-group invariant
            metadata.group = self.config.default_group.clone();
        }
        Ok(metadata)
    }

    /// Full run: extract, render both artifacts into staging, then commit.
    /// A serialization failure discards the staged files and leaves the
    /// previous output in place.
    pub fn run(&self, host: &dyn HostAdapter) -> Result<RunReport, GenerateError> {
        let report = self.extract(host)?;

        let render_config = RenderConfig {
            title: self.config.title.clone(),
            base_url: self.config.parsed_base_url()?,
        };

        let groups_dir = self.config.output.markdown_dir.join("groups");
        let staged_pages = StagedDir::create(&groups_dir)?;
        let mut staged = Vec::new();
        for (key, members) in &report.model.groups {
            match render_group_page(key, members, &render_config) {
                Ok(page) => staged.push((markdown_page_name(key), page)),
                Err(err) => {
                    staged_pages.discard();
                    return Err(err.into());
                }
            }
        }
        for (name, page) in &staged {
            if let Err(err) = staged_pages.write_file(name, page) {
                staged_pages.discard();
                return Err(err.into());
            }
        }

        let collection = match render_collection(&report.model, &render_config) {
            Ok(json) => json,
            Err(err) => {
                staged_pages.discard();
                return Err(err.into());
            }
        };
        let staged_collection =
            match StagedFile::write(&self.config.output.collection_file, &collection) {
                Ok(staged) => staged,
                Err(err) => {
                    staged_pages.discard();
                    return Err(err.into());
                }
            };

        staged_pages.commit()?;
        staged_collection.commit()?;

        println!(
            "Processed {} routes, skipped {}.",
            report.processed(),
            report.skipped()
        );
        Ok(report)
    }
}
