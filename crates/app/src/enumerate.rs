use lattice::prelude::*;

use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli::AppArgs { outfile, dims } = match cli::create() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("usage: enumerate [--dims \"n_1 n_2 ...\"] <outfile>");
            std::process::exit(1);
        }
    };

    info!("enumerating induced subtrees of the {:?} lattice", dims);

    let graph = HrpGraph::new(&dims)?;
    let pool = WorkerPool::new()?;
    let ctx = SearchContext::new(outfile, pool.size());

    enumerate_largest(&graph, &pool, &ctx);

    Ok(())
}

mod cli {
    use pico_args::Arguments;
    use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

    use lattice::prelude::VertexId;

    const DEFAULT_DIMS: [VertexId; 3] = [3, 3, 3];

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) outfile: PathBuf,
        pub(crate) dims: Vec<VertexId>,
    }

    pub(crate) fn create() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut pargs = Arguments::from_env();

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf, Infallible> {
            Ok(arg.into())
        }

        let args = AppArgs {
            dims: pargs
                .opt_value_from_fn("--dims", parse_dims)?
                .unwrap_or_else(|| DEFAULT_DIMS.to_vec()),
            outfile: pargs.free_from_os_str(as_path_buf)?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(format!("unexpected arguments: {:?}", remaining).into());
        }

        Ok(args)
    }

    pub(crate) fn parse_dims(arg: &str) -> Result<Vec<VertexId>, String> {
        let dims = arg
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<VertexId>()
                    .map_err(|_| format!("invalid dimension {:?}", token))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if dims.is_empty() {
            return Err("expected at least one dimension".into());
        }
        Ok(dims)
    }
}
