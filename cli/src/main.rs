use anyhow::{Context, Result};
use clap::Parser;
use minisearch_core::{Document, InvertedIndex};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "minisearch")]
#[command(about = "Build a TF-IDF inverted index and run ranked keyword queries", long_about = None)]
struct Args {
    /// Query to run; reads queries line-by-line from stdin when omitted
    query: Option<String>,
    /// Documents as a JSON/JSONL file or a directory of such files;
    /// a built-in demo set is used when omitted
    #[arg(long)]
    docs: Option<PathBuf>,
    /// Maximum number of results per query
    #[arg(long, default_value_t = 10)]
    limit: usize,
    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let documents = match &args.docs {
        Some(path) => load_docs(path)?,
        None => demo_docs(),
    };
    tracing::info!(num_docs = documents.len(), "documents loaded");
    let index = InvertedIndex::build(&documents);

    if let Some(query) = &args.query {
        run_query(&index, query, args.limit, args.json);
    } else {
        for line in io::stdin().lock().lines() {
            let line = line?;
            run_query(&index, line.trim(), args.limit, args.json);
        }
    }
    Ok(())
}

/// Built-in five-document corpus used when no document path is given.
fn demo_docs() -> Vec<Document> {
    [
        ("doc0", "Cats like pillows"),
        ("doc1", "Dogs like couches"),
        ("doc2", "Cats and dogs like treats"),
        ("doc3", "Milk is good for cats"),
        ("doc4", "Bones are good for dogs"),
    ]
    .into_iter()
    .map(|(id, text)| Document { id: id.into(), text: text.into() })
    .collect()
}

fn load_docs(path: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        // Fixed file order keeps internal doc ids stable across rebuilds
        files.sort();
    } else {
        files.push(path.to_path_buf());
    }

    let mut documents = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut documents)?;
        } else {
            load_json(&file, &mut documents)?;
        }
    }
    Ok(documents)
}

fn load_jsonl(file: &Path, documents: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("open {}", file.display()))?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("parse document in {}", file.display()))?;
        documents.push(doc);
    }
    Ok(())
}

fn load_json(file: &Path, documents: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("open {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                documents.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => documents.push(serde_json::from_value(json)?),
        _ => {}
    }
    Ok(())
}

fn run_query(index: &InvertedIndex, query: &str, limit: usize, json: bool) {
    let start = std::time::Instant::now();
    let hits = index.search(query);
    let elapsed = start.elapsed();
    let total_hits = hits.len();
    let top: Vec<_> = hits.into_iter().take(limit).collect();

    if json {
        let out = serde_json::json!({
            "query": query,
            "took_s": elapsed.as_secs_f64(),
            "total_hits": total_hits,
            "results": top,
        });
        println!("{out}");
        return;
    }

    println!(
        "query: {query:?} ({total_hits} hits, {:.3} ms)",
        elapsed.as_secs_f64() * 1000.0
    );
    if top.is_empty() {
        println!("  no matching documents");
    }
    for hit in &top {
        let text = index
            .docs
            .get(&hit.doc_id)
            .map(|m| m.text.as_str())
            .unwrap_or("");
        println!("  {}  score={:.3}  {}", hit.external_id, hit.score, text);
    }
}
