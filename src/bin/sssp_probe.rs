use std::env;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sysinfo::{get_current_pid, ProcessExt, ProcessRefreshKind, System, SystemExt};
use thorup_sssp::{
    dijkstra, dimacs, generator::random_connected_graph, KruskalMsb, MstAlgorithm, Prim,
    ThorupEngine, WeightedGraph,
};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("sssp_probe: {err}");
            Options::print_help();
            std::process::exit(1);
        }
    };

    let graph = match load_graph(&options) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("sssp_probe: {err}");
            std::process::exit(1);
        }
    };
    let n = graph.num_vertices();
    if options.source >= n {
        eprintln!("sssp_probe: source {} out of range 0..{n}", options.source);
        std::process::exit(1);
    }

    eprintln!(
        "graph: {} vertices, {} directed edges",
        n,
        graph.num_edges()
    );

    let mut sys = System::new();
    let reference = dijkstra::shortest_paths(&graph, options.source)
        .expect("source was checked against the vertex count");

    let algorithm: &dyn MstAlgorithm = match options.mst {
        MstChoice::Kruskal => &KruskalMsb,
        MstChoice::Prim => &Prim,
    };

    let mut engine = ThorupEngine::new();
    let before = rss_kib(&mut sys);
    let start = Instant::now();
    let prepare_result = engine
        .construct_msb_mst(graph, algorithm)
        .and_then(|()| engine.construct_other_data_structures());
    if let Err(err) = prepare_result {
        eprintln!("sssp_probe: prepare failed: {err}");
        std::process::exit(1);
    }
    let prepare_s = start.elapsed().as_secs_f64();
    let rss_delta = rss_kib(&mut sys).saturating_sub(before);

    let mut rows = Vec::with_capacity(options.queries + 1);
    rows.push(Row {
        phase: "prepare",
        wall_s: prepare_s,
        rss_delta_kib: rss_delta,
        checked: false,
        passed: true,
    });

    let mut all_passed = true;
    for q in 0..options.queries {
        let start = Instant::now();
        let d = match engine.find_shortest_paths(options.source) {
            Ok(d) => d,
            Err(err) => {
                eprintln!("sssp_probe: query failed: {err}");
                std::process::exit(1);
            }
        };
        let wall_s = start.elapsed().as_secs_f64();
        let passed = d == reference;
        all_passed &= passed;
        eprintln!(
            "query {}/{}: {:.4}s, cross-check {}",
            q + 1,
            options.queries,
            wall_s,
            if passed { "passed" } else { "FAILED" }
        );
        rows.push(Row {
            phase: "query",
            wall_s,
            rss_delta_kib: 0,
            checked: true,
            passed,
        });
    }

    options.format.write(&rows);
    if !all_passed {
        eprintln!("sssp_probe: distances disagree with the Dijkstra reference");
        std::process::exit(1);
    }
}

fn load_graph(options: &Options) -> thorup_sssp::Result<WeightedGraph> {
    match &options.input {
        Input::Dimacs(path) => dimacs::read_dimacs_file(path),
        Input::Random {
            vertices,
            extra_edges,
            max_weight,
        } => {
            let mut rng = StdRng::seed_from_u64(options.seed);
            Ok(random_connected_graph(
                &mut rng,
                *vertices,
                *extra_edges,
                *max_weight,
            ))
        }
    }
}

struct Options {
    input: Input,
    source: usize,
    queries: usize,
    seed: u64,
    mst: MstChoice,
    format: OutputFormat,
}

enum Input {
    Dimacs(String),
    Random {
        vertices: usize,
        extra_edges: usize,
        max_weight: i32,
    },
}

#[derive(Copy, Clone)]
enum MstChoice {
    Kruskal,
    Prim,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut dimacs: Option<String> = None;
        let mut vertices = 10_000usize;
        let mut extra_edges = 30_000usize;
        let mut max_weight = 1_000_000i32;
        let mut source = 0usize;
        let mut queries = 3usize;
        let mut seed = 42u64;
        let mut mst = MstChoice::Kruskal;
        let mut format = OutputFormat::Table;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let mut value_of = |name: &str| -> Result<String, String> {
                args.next()
                    .map(Into::into)
                    .ok_or_else(|| format!("missing value after {name}"))
            };
            match arg.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--dimacs" => dimacs = Some(value_of("--dimacs")?),
                "--vertices" => vertices = parse_number(&value_of("--vertices")?)?,
                "--extra-edges" => extra_edges = parse_number(&value_of("--extra-edges")?)?,
                "--max-weight" => {
                    max_weight = parse_number(&value_of("--max-weight")?)?;
                    if max_weight < 1 {
                        return Err("--max-weight must be positive".into());
                    }
                }
                "--source" => source = parse_number(&value_of("--source")?)?,
                "--queries" => queries = parse_number(&value_of("--queries")?)?,
                "--seed" => seed = parse_number(&value_of("--seed")?)?,
                "--mst" => {
                    mst = match value_of("--mst")?.as_str() {
                        "kruskal" => MstChoice::Kruskal,
                        "prim" => MstChoice::Prim,
                        other => return Err(format!("unknown mst algorithm '{other}'")),
                    }
                }
                "--format" => format = OutputFormat::from_str(&value_of("--format")?)?,
                other => return Err(format!("unrecognized argument '{other}'")),
            }
        }

        let input = match dimacs {
            Some(path) => Input::Dimacs(path),
            None => Input::Random {
                vertices,
                extra_edges,
                max_weight,
            },
        };
        Ok(Self {
            input,
            source,
            queries,
            seed,
            mst,
            format,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin sssp_probe [-- <options>]

Runs Thorup's SSSP engine on a DIMACS file or a random connected graph,
cross-checks every query against a Dijkstra reference and reports wall
times.

Options:
  --dimacs <FILE>       Read the graph from a DIMACS sp file
  --vertices <N>        Random graph size (default: 10000)
  --extra-edges <M>     Extra random edges beyond the tree (default: 30000)
  --max-weight <W>      Maximum random edge weight (default: 1000000)
  --source <S>          Source vertex, 0-based (default: 0)
  --queries <K>         Repeated queries on the prepared state (default: 3)
  --seed <SEED>         RNG seed for random graphs (default: 42)
  --mst <kruskal|prim>  MST algorithm for the prepare phase
  --format <csv|table>  Output format (default: table)
  -h, --help            Print this help message
"
        );
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("'{value}' is not a valid number"))
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, rows: &[Row]) {
        match self {
            OutputFormat::Csv => {
                println!("phase,wall_s,rss_delta_kib,crosscheck");
                for row in rows {
                    println!(
                        "{},{:.6},{},{}",
                        row.phase,
                        row.wall_s,
                        row.rss_delta_kib,
                        row.status()
                    );
                }
            }
            OutputFormat::Table => {
                println!(
                    "{:<8}  {:>10}  {:>14}  {:>10}",
                    "phase", "wall_s", "rss_delta_kib", "crosscheck"
                );
                for row in rows {
                    println!(
                        "{:<8}  {:>10.4}  {:>14}  {:>10}",
                        row.phase,
                        row.wall_s,
                        row.rss_delta_kib,
                        row.status()
                    );
                }
            }
        }
    }
}

struct Row {
    phase: &'static str,
    wall_s: f64,
    rss_delta_kib: u64,
    checked: bool,
    passed: bool,
}

impl Row {
    fn status(&self) -> &'static str {
        if !self.checked {
            "-"
        } else if self.passed {
            "passed"
        } else {
            "failed"
        }
    }
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}
