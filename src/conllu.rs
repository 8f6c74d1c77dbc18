//! CoNLL-U sentence reader
//!
//! Reads CoNLL-U files and turns every sentence into the two edge lists the
//! metrics work on. Token relations are classified by DEPREL and HEAD:
//! `punct` goes to the punctuation edges, `root`, `HEAD = 0` or a token
//! governing itself becomes the root edge, everything else is syntactic.
//! Multiword tokens and empty nodes are skipped.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::graph::{Edge, NodeId, ROOT};
use crate::sentence::SentenceEdges;

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
#[error("Parse error at line {line_num}: {message}")]
pub struct ParseError {
    pub line_num: usize,
    pub message: String,
}

/// CoNLL-U reader that iterates over sentences
pub struct CoNLLUReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> CoNLLUReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl CoNLLUReader<Box<dyn BufRead>> {
    /// Create a reader from a file path; `.gz` files are decompressed
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: Read> CoNLLUReader<BufReader<MultiGzDecoder<R>>> {
    /// Create a reader over gzip-compressed input
    pub fn from_gz(reader: R) -> Self {
        Self::new(BufReader::new(MultiGzDecoder::new(reader)))
    }
}

impl CoNLLUReader<BufReader<std::io::Cursor<String>>> {
    /// Create a reader from a string
    pub fn from_str(text: &str) -> Self {
        let cursor = std::io::Cursor::new(text.to_string());
        Self::new(BufReader::new(cursor))
    }
}

impl<R: BufRead> Iterator for CoNLLUReader<R> {
    type Item = Result<SentenceEdges, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut edges = SentenceEdges::default();
        let mut tokens = 0;

        // Read lines until we hit a blank line (sentence boundary) or EOF
        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if tokens == 0 {
                        return None;
                    }
                    // Last sentence without trailing blank line
                    break;
                }
                Some(Err(e)) => {
                    return Some(Err(ParseError {
                        line_num: self.line_num,
                        message: format!("IO error: {}", e),
                    }));
                }
                Some(Ok(line)) => {
                    let line = line.trim();

                    if line.is_empty() {
                        if tokens > 0 {
                            break;
                        }
                        continue;
                    }

                    // Comments and sentence metadata
                    if line.starts_with('#') {
                        continue;
                    }

                    match parse_line(line, self.line_num) {
                        Ok(Some(relation)) => {
                            tokens += 1;
                            match relation {
                                Relation::Syntactic(edge) => edges.dependency_edges.push(edge),
                                Relation::Punct(edge) => edges.punct_edges.push(edge),
                            }
                        }
                        Ok(None) => {
                            tracing::trace!(line_num = self.line_num, "skipping non-word token");
                        }
                        Err(e) => {
                            self.skip_sentence();
                            return Some(Err(e));
                        }
                    }
                }
            }
        }

        Some(Ok(edges))
    }
}

impl<R: BufRead> CoNLLUReader<R> {
    /// Consume the rest of a broken sentence so iteration can resume
    fn skip_sentence(&mut self) {
        while let Some(Ok(line)) = self.lines.next() {
            self.line_num += 1;
            if line.trim().is_empty() {
                break;
            }
        }
    }
}

/// Where a token's edge belongs
#[derive(Debug, PartialEq, Eq)]
enum Relation {
    Syntactic(Edge),
    Punct(Edge),
}

/// Parse a token line; `None` for multiword tokens and empty nodes
fn parse_line(line: &str, line_num: usize) -> Result<Option<Relation>, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 10 {
        return Err(ParseError {
            line_num,
            message: format!("Expected 10 fields, found {}", fields.len()),
        });
    }

    // Field 0: ID, ranges (1-2) and decimals (2.1) are not words
    if fields[0].contains(['-', '.']) {
        return Ok(None);
    }
    let id = parse_index(fields[0], line_num, "ID")?;
    if id == ROOT {
        return Err(ParseError {
            line_num,
            message: "Token ID must be positive".to_string(),
        });
    }

    // Field 6: HEAD
    let head = parse_index(fields[6], line_num, "HEAD")?;

    // Field 7: DEPREL
    let deprel = fields[7];

    let relation = if deprel.eq_ignore_ascii_case("punct") {
        Relation::Punct((head, id))
    } else if head == ROOT || head == id || deprel.eq_ignore_ascii_case("root") {
        Relation::Syntactic((ROOT, id))
    } else {
        Relation::Syntactic((head, id))
    };
    Ok(Some(relation))
}

fn parse_index(s: &str, line_num: usize, field: &str) -> Result<NodeId, ParseError> {
    s.parse().map_err(|_| ParseError {
        line_num,
        message: format!("Invalid {}: {}", field, s),
    })
}
