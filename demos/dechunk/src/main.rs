//! chunked 形式のボディをデコードして標準出力に書く例
//!
//! 使い方:
//!   printf '4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n' | cargo run -p dechunk
//!   cargo run -p dechunk -- body.chunked --max-body-size 1048576

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use http11_chunked::{ChunkedReader, DecoderLimits};

struct Options {
    path: Option<String>,
    limits: DecoderLimits,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let result = match &options.path {
        Some(path) => {
            let file = File::open(path)?;
            dechunk(BufReader::new(file), options.limits)
        }
        None => dechunk(io::stdin().lock(), options.limits),
    };

    match result {
        Ok(size) => {
            eprintln!("decoded {} bytes", size);
            Ok(())
        }
        Err(e) => {
            eprintln!("Decode error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Result<Options, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "dechunk";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let defaults = DecoderLimits::default();

    // --max-body-size オプション
    let max_body_size: Option<usize> = noargs::opt("max-body-size")
        .doc("Maximum decoded body size in bytes (default: unlimited)")
        .take(&mut args)
        .present_and_then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --max-chunk-line-size オプション
    let max_chunk_line_size: Option<usize> = noargs::opt("max-chunk-line-size")
        .doc("Maximum chunk extension line size in bytes (default: unlimited)")
        .take(&mut args)
        .present_and_then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 位置引数: 入力ファイル (省略時は標準入力)
    let path: Option<String> = noargs::arg("[PATH]")
        .doc("Chunked body file (default: stdin)")
        .take(&mut args)
        .present_and_then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(Options {
        path,
        limits: DecoderLimits {
            max_body_size: max_body_size.unwrap_or(defaults.max_body_size),
            max_chunk_line_size: max_chunk_line_size.unwrap_or(defaults.max_chunk_line_size),
            ..defaults
        },
    })
}

/// 入力をデコードして標準出力に書き、デコードしたバイト数を返す
fn dechunk<R: BufRead>(input: R, limits: DecoderLimits) -> io::Result<u64> {
    let mut reader = ChunkedReader::with_limits(input, limits);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let size = io::copy(&mut reader, &mut out)?;
    out.flush()?;
    Ok(size)
}
