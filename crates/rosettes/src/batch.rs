//! Batch dispatcher: fan independent jobs out over a worker pool.
//!
//! Jobs are `(source, language)` pairs. Lexers and the formatter resolve
//! up front so a bad name fails the whole call before any work starts;
//! after that each job touches only its own arguments and the shared
//! read-only singletons. Results always come back in submission order.
//!
//! Small batches run inline on the caller: below
//! [`SEQUENTIAL_THRESHOLD`] jobs, pool dispatch costs more than it saves.

use rayon::prelude::*;
use rosettes_core::{ClassStyle, FormatConfig, HighlightConfig, Result, Token};
use rosettes_fmt::{get_formatter, Formatter};
use rosettes_lex::{get_lexer, Lexer};

/// Batches smaller than this run sequentially on the caller.
pub const SEQUENTIAL_THRESHOLD: usize = 8;

/// Options for [`highlight_many`].
#[derive(Clone, Debug)]
pub struct BatchOptions<'a> {
    /// Formatter name or alias. Default `"html"`.
    pub formatter: &'a str,

    /// HTML class naming scheme. Default [`ClassStyle::Semantic`].
    pub class_style: ClassStyle,

    /// Worker threads for large batches. Default `min(4, cpu_count)`.
    pub max_workers: Option<usize>,
}

impl Default for BatchOptions<'_> {
    fn default() -> Self {
        Self {
            formatter: "html",
            class_style: ClassStyle::Semantic,
            max_workers: None,
        }
    }
}

fn worker_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or_else(|| num_cpus::get().min(4))
        .max(1)
}

fn render(
    source: &str,
    lexer: &'static dyn Lexer,
    formatter: &'static dyn Formatter,
    class_style: ClassStyle,
) -> String {
    let format = FormatConfig {
        container_class: None,
        data_language: lexer.name().to_owned(),
        class_style,
    };
    if formatter.has_fast_path() {
        formatter.format_string_fast(&mut lexer.tokenize_fast(source), &format)
    } else {
        formatter.format_string(
            &mut lexer.tokenize(source),
            &format,
            &HighlightConfig::default(),
        )
    }
}

/// Runs `work` over `items`, in parallel when the batch is large enough
/// and a pool can be built, sequentially otherwise. Order is preserved
/// either way.
fn dispatch<T, R, F>(items: Vec<T>, workers: usize, work: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
{
    if items.len() < SEQUENTIAL_THRESHOLD {
        return items.into_iter().map(work).collect();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => {
            log::debug!("dispatching {} jobs across {} workers", items.len(), workers);
            pool.install(|| items.into_par_iter().map(work).collect())
        }
        Err(error) => {
            log::warn!("worker pool unavailable ({error}); running batch sequentially");
            items.into_iter().map(work).collect()
        }
    }
}

/// Highlights every `(source, language)` job and returns the outputs in
/// submission order.
///
/// # Errors
///
/// Unknown language or formatter name; resolution happens before any job
/// runs, so either the whole batch proceeds or none of it does.
pub fn highlight_many(jobs: &[(&str, &str)], options: &BatchOptions<'_>) -> Result<Vec<String>> {
    let formatter = get_formatter(options.formatter)?;
    let resolved: Vec<(&str, &'static dyn Lexer)> = jobs
        .iter()
        .map(|(source, language)| Ok((*source, get_lexer(language)?)))
        .collect::<Result<_>>()?;

    let class_style = options.class_style;
    Ok(dispatch(
        resolved,
        worker_count(options.max_workers),
        move |(source, lexer)| render(source, lexer, formatter, class_style),
    ))
}

/// Tokenizes every `(source, language)` job and returns the token lists in
/// submission order.
///
/// # Errors
///
/// Unknown language name, before any job runs.
pub fn tokenize_many<'src>(
    jobs: &[(&'src str, &str)],
    max_workers: Option<usize>,
) -> Result<Vec<Vec<Token<'src>>>> {
    let resolved: Vec<(&'src str, &'static dyn Lexer)> = jobs
        .iter()
        .map(|(source, language)| Ok((*source, get_lexer(language)?)))
        .collect::<Result<_>>()?;

    Ok(dispatch(
        resolved,
        worker_count(max_workers),
        |(source, lexer)| lexer.tokenize(source).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{highlight, tokenize};

    #[test]
    fn test_small_batch_matches_single_calls() {
        let jobs = [("def f(): pass", "python"), ("fn main() {}", "rust")];
        let outputs = highlight_many(&jobs, &BatchOptions::default()).unwrap();
        assert_eq!(outputs.len(), 2);
        for ((source, language), output) in jobs.iter().zip(&outputs) {
            assert_eq!(output, &highlight(source, language).unwrap());
        }
    }

    #[test]
    fn test_large_batch_preserves_order() {
        let sources: Vec<String> = (0..50).map(|i| format!("x{i} = {i}")).collect();
        let jobs: Vec<(&str, &str)> = sources
            .iter()
            .enumerate()
            .map(|(i, s)| {
                (
                    s.as_str(),
                    if i % 2 == 0 { "python" } else { "javascript" },
                )
            })
            .collect();
        let outputs = highlight_many(&jobs, &BatchOptions::default()).unwrap();
        assert_eq!(outputs.len(), jobs.len());
        for ((source, language), output) in jobs.iter().zip(&outputs) {
            assert_eq!(output, &highlight(source, language).unwrap());
        }
    }

    #[test]
    fn test_bad_language_fails_whole_batch() {
        let jobs = [("a", "python"), ("b", "klingon")];
        assert!(highlight_many(&jobs, &BatchOptions::default()).is_err());
    }

    #[test]
    fn test_tokenize_many_matches_single_calls() {
        let jobs: Vec<(&str, &str)> = (0..20)
            .map(|i| if i % 2 == 0 { ("a b", "plaintext") } else { ("1+2", "python") })
            .collect();
        let batched = tokenize_many(&jobs, Some(2)).unwrap();
        for ((source, language), tokens) in jobs.iter().zip(&batched) {
            assert_eq!(tokens, &tokenize(source, language).unwrap());
        }
    }

    #[test]
    fn test_explicit_worker_count() {
        let jobs: Vec<(&str, &str)> = std::iter::repeat(("let x = 1;", "rust")).take(32).collect();
        let outputs = highlight_many(
            &jobs,
            &BatchOptions {
                max_workers: Some(2),
                ..BatchOptions::default()
            },
        )
        .unwrap();
        assert!(outputs.iter().all(|o| o == &outputs[0]));
    }
}
