pub mod diagnostics;
pub mod rules;
pub mod runner;
pub mod suppress;
pub(crate) mod text;

pub use diagnostics::{Diagnostic, RunResult, Severity};
pub use rules::{Rule, RuleContext, RuleOutcome, RuleRegistry};
pub use runner::CheckRunner;

use std::path::Path;

use crate::config::Config;
use crate::frontmatter::FrontmatterError;

/// Check a document and return the aggregate run result.
pub fn check(input: &str, config: &Config, path: &Path) -> Result<RunResult, FrontmatterError> {
    CheckRunner::new().run(config, input, path)
}

/// Create the registry with all built-in checks, in their fixed execution
/// order. The order is part of the contract: content-rewriting checks run
/// last, and a later check always sees the output of earlier rewrites.
pub fn default_registry() -> RuleRegistry {
    use rules::*;

    let mut registry = RuleRegistry::new();
    registry.register(Box::new(whitespace::TrailingWhitespace));
    registry.register(Box::new(preview::MoreSeparator));
    registry.register(Box::new(headlines::DeepHeadline::level3()));
    registry.register(Box::new(headlines::DeepHeadline::level4()));
    registry.register(Box::new(headlines::DeepHeadline::level5()));
    registry.register(Box::new(tags::MissingTags));
    registry.register(Box::new(tags::MissingWordsAsTags));
    registry.register(Box::new(tags::TagFormat));
    registry.register(Box::new(tags::CategoryFormat));
    registry.register(Box::new(tags::OtherTagsOneWay));
    registry.register(Box::new(tags::OtherTagsBothWays));
    registry.register(Box::new(cursive::MissingCursive));
    registry.register(Box::new(links::HttpLink));
    registry.register(Box::new(links::HugoLocalhost));
    registry.register(Box::new(words::LowercaseI));
    registry.register(Box::new(tags::Changeme));
    registry.register(Box::new(code_blocks::FencedCodeBlocks));
    registry.register(Box::new(code_blocks::PsqlCodeBlocks));
    registry.register(Box::new(preview::ImageInsidePreview));
    registry.register(Box::new(preview::PreviewThumbnail));
    registry.register(Box::new(preview::PreviewDescription));
    registry.register(Box::new(assets::ImageSize));
    registry.register(Box::new(assets::ForbiddenExifTags));
    registry.register(Box::new(words::Dass));
    registry.register(Box::new(headlines::EmptyLineAfterHeader));
    registry.register(Box::new(code_blocks::EmptyLineAfterList));
    registry.register(Box::new(code_blocks::EmptyLineAfterCode));
    registry.register(Box::new(words::ForbiddenWords));
    registry.register(Box::new(links::ForbiddenWebsites));
    registry.register(Box::new(header_fields::HeaderFieldLength));
    registry.register(Box::new(words::DoubleBrackets));
    registry.register(Box::new(words::Fixme));
    registry.register(Box::new(whitespace::StripTrailingWhitespace));
    registry.register(Box::new(links::ReplaceBrokenLinks));
    registry
}
