//! Kiln optimizer CLI

use kilnc::{init_tracing, parse_args, run};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return;
    }

    match parse_args(&args).and_then(|invocation| run(&invocation)) {
        Ok(report) => print!("{report}"),
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Run 'kiln --help' for usage.");
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("Kiln range optimizer");
    println!();
    println!("Usage: kiln [options] <arg>...");
    println!();
    println!("Arguments (1 to 3):");
    println!("  <int>                Integer literal, e.g. 10 or -3");
    println!("  <float>              Float literal, e.g. 5.0");
    println!("  ?                    Value not known at compile time");
    println!();
    println!("Options:");
    println!("  --python=<version>   Language version (default: 2.7)");
    println!("  --lazy               Call the lazy builtin (xrange before 3)");
    println!("  --iterate            Wrap the call in a for-loop iteration");
    println!("  --threshold=<n>      Iteration lowering threshold (default: 256)");
    println!();
    println!("Set RUST_LOG=debug to trace optimizer decisions.");
}
