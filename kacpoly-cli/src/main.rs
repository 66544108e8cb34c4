use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use kacpoly_core::{
    a_gamma, c_gamma, c_gamma_list, h_gamma, inner_product, partitions_of, three_loop_reference,
    AlgebraContext, KacConfig, KacError, Quiver, UniPoly, REFERENCE_LOOPS,
};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

mod logger;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logger::init(cli.verbose) {
        eprintln!("failed to install logger: {}", e);
    }
    let json = cli.json;
    let outcome = match cli.cmd {
        Command::Kac { quiver, budget } => run_kac(&quiver, budget.into(), json),
        Command::H { quiver, budget } => run_h(&quiver, budget.into(), json),
        Command::WallCrossing {
            quiver,
            budget,
            table,
            reference,
        } => run_wall_crossing(&quiver, budget.into(), table.as_deref(), reference, json),
        Command::Reference { check } => run_reference(check),
        Command::Partitions { n } => {
            run_partitions(n);
            Ok(())
        }
    };
    if let Err(err) = outcome {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "kacpoly",
    about = "Exact Kac polynomials and wall-crossing invariants of quivers"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON reports
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Kac polynomial A(q) of a quiver at its dimension vector
    Kac {
        #[command(flatten)]
        quiver: QuiverArgs,
        #[command(flatten)]
        budget: BudgetArgs,
    },

    /// H(w): gcd-scaled log coefficient, before Möbius aggregation
    #[command(name = "h")]
    H {
        #[command(flatten)]
        quiver: QuiverArgs,
        #[command(flatten)]
        budget: BudgetArgs,
    },

    /// Wall-crossing invariant C(q) of a one-vertex quiver
    WallCrossing {
        #[command(flatten)]
        quiver: QuiverArgs,
        #[command(flatten)]
        budget: BudgetArgs,

        /// Precomputed A(q) values for dimensions 1, 2, ..., one per line
        #[arg(long, conflicts_with = "reference")]
        table: Option<PathBuf>,

        /// Use the built-in three-loop table instead of recomputing
        #[arg(long, action = ArgAction::SetTrue)]
        reference: bool,
    },

    /// Print the built-in three-loop table and check it against recomputation
    Reference {
        /// Recompute dimensions 1..=check (at most 5)
        #[arg(long, default_value_t = 3)]
        check: u32,
    },

    /// List the partitions of n with their conjugates and multiplicities
    Partitions {
        #[arg(long, default_value_t = 4)]
        n: u32,
    },
}

#[derive(Args, Debug)]
struct QuiverArgs {
    /// JSON file: {"vertices": [..], "edges": [[s, t], ..], "dimension": [..]}
    #[arg(long, conflicts_with_all = ["vertices", "loops"])]
    quiver: Option<PathBuf>,

    /// Vertex names
    #[arg(long, value_delimiter = ',')]
    vertices: Vec<String>,

    /// Edge as source:target (repeatable)
    #[arg(long = "edge")]
    edges: Vec<String>,

    /// One vertex carrying this many loops
    #[arg(long, conflicts_with = "vertices")]
    loops: Option<usize>,

    /// Dimension vector
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    dim: Vec<i64>,
}

impl QuiverArgs {
    fn build(&self) -> Result<Quiver> {
        if let Some(path) = &self.quiver {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading quiver file {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("parsing quiver file {}", path.display()));
        }
        if let Some(loops) = self.loops {
            let edges = vec![("v".to_string(), "v".to_string()); loops];
            return Ok(Quiver::from_signed(vec!["v".to_string()], edges, self.dim.clone())?);
        }
        if self.vertices.is_empty() {
            bail!("specify a quiver with --quiver, --loops or --vertices");
        }
        let mut edges = Vec::with_capacity(self.edges.len());
        for e in &self.edges {
            let (s, t) = e
                .split_once(':')
                .with_context(|| format!("edge '{}' is not of the form source:target", e))?;
            edges.push((s.to_string(), t.to_string()));
        }
        Ok(Quiver::from_signed(self.vertices.clone(), edges, self.dim.clone())?)
    }
}

#[derive(Args, Debug)]
struct BudgetArgs {
    /// Abort when P-series needs more partition tuples than this
    #[arg(long)]
    max_tuples: Option<usize>,

    /// Abort when an intermediate series holds more monomials than this
    #[arg(long)]
    max_terms: Option<usize>,

    /// Keep monomials outside the target box while expanding the log
    #[arg(long, action = ArgAction::SetTrue)]
    no_truncate: bool,
}

impl From<BudgetArgs> for KacConfig {
    fn from(b: BudgetArgs) -> Self {
        KacConfig {
            max_partition_tuples: b.max_tuples,
            max_series_terms: b.max_terms,
            truncate_to_target: !b.no_truncate,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    invariant: &'a str,
    quiver: &'a Quiver,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coefficients: Option<Vec<(usize, String)>>,
}

fn poly_coefficients(p: &UniPoly) -> Vec<(usize, String)> {
    p.terms().map(|(k, c)| (k, c.to_string())).collect()
}

fn emit(report: &Report<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.quiver);
        println!("{} = {}", report.invariant, report.value);
    }
    Ok(())
}

fn run_kac(args: &QuiverArgs, config: KacConfig, json: bool) -> Result<()> {
    let quiver = args.build()?;
    let ctx = AlgebraContext::for_quiver(&quiver, config);
    info!("computing A for {}", quiver);
    let a = a_gamma(&ctx, &quiver)?;
    emit(
        &Report {
            invariant: "A(q)",
            quiver: &quiver,
            value: a.to_string(),
            coefficients: Some(poly_coefficients(&a)),
        },
        json,
    )
}

fn run_h(args: &QuiverArgs, config: KacConfig, json: bool) -> Result<()> {
    let quiver = args.build()?;
    let ctx = AlgebraContext::for_quiver(&quiver, config);
    let h = h_gamma(&ctx, &quiver)?;
    emit(
        &Report {
            invariant: "H(w)",
            quiver: &quiver,
            value: h.display_in(ctx.weight_var()).to_string(),
            coefficients: None,
        },
        json,
    )
}

fn load_table(path: &Path) -> Result<Vec<UniPoly>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading table {}", path.display()))?;
    let mut table = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let poly: UniPoly = line
            .parse()
            .with_context(|| format!("{}:{}", path.display(), n + 1))?;
        table.push(poly);
    }
    Ok(table)
}

fn run_wall_crossing(
    args: &QuiverArgs,
    config: KacConfig,
    table: Option<&Path>,
    reference: bool,
    json: bool,
) -> Result<()> {
    let quiver = args.build()?;
    let result = if let Some(path) = table {
        c_gamma_list(&quiver, &load_table(path)?)
    } else if reference {
        c_gamma_list(&quiver, &three_loop_reference()?)
    } else {
        let ctx = AlgebraContext::for_quiver(&quiver, config);
        c_gamma(&ctx, &quiver)
    };
    let c = match result {
        Ok(c) => c,
        Err(KacError::UnsupportedOperation { vertices }) => {
            println!(
                "C(q) is not applicable: the quiver has {} vertices, one is required",
                vertices
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    emit(
        &Report {
            invariant: "C(q)",
            quiver: &quiver,
            value: c.to_string(),
            coefficients: Some(poly_coefficients(&c)),
        },
        json,
    )
}

fn run_reference(check: u32) -> Result<()> {
    let table = three_loop_reference()?;
    println!("Reference A(q), one vertex with {} loops:", REFERENCE_LOOPS);
    for (i, p) in table.iter().enumerate() {
        println!("  [{}]  {}", i + 1, p);
    }
    let ctx = AlgebraContext::new(1);
    let upto = check.min(table.len() as u32);
    let mut mismatches = 0;
    for dim in 1..=upto {
        let computed = a_gamma(&ctx, &Quiver::loops(REFERENCE_LOOPS, dim))?;
        let ok = computed == table[dim as usize - 1];
        if !ok {
            mismatches += 1;
        }
        println!(
            "[Regression] dimension [{}] => {}",
            dim,
            if ok { "(OK)" } else { "(MISMATCH)" }
        );
    }
    if mismatches > 0 {
        bail!("{} reference entries disagree with recomputation", mismatches);
    }
    Ok(())
}

fn run_partitions(n: u32) {
    let parts = partitions_of(n);
    println!("Partitions of {} (count={})", n, parts.len());
    for (i, p) in parts.iter().enumerate() {
        let mult: Vec<String> = p
            .exponent_multiset()
            .iter()
            .map(|(part, m)| format!("{}^{}", part, m))
            .collect();
        println!(
            "  {:>3}) {}  conjugate={}  multiplicities=[{}]  <p,p>={}",
            i + 1,
            p,
            p.conjugate(),
            mult.join(" "),
            inner_product(p, p)
        );
    }
}
