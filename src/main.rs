use clap::Parser;
use std::process::ExitCode;
use timestamp_editor::{
    apply, creation_time_supported, scan, AppError, ApplyOptions, FileEntry, ScanResponse,
    NO_DATE_PLACEHOLDER,
};

#[derive(Debug, Parser)]
#[command(
    name = "timestamp-editor",
    version,
    about = "ファイル名から抽出した撮影日時にファイルのタイムスタンプを合わせるツール"
)]
struct Cli {
    /// 対象の画像フォルダ
    folder: String,

    /// Changeステータスのファイルのタイムスタンプを書き換える
    #[arg(long)]
    apply: bool,

    /// 更新日時・アクセス日時は変更しない
    #[arg(long)]
    no_modified: bool,

    /// 作成日時も変更する（Windowsのみ）
    #[arg(long)]
    created: bool,

    /// 結果をJSONで出力する
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let scanned = scan(&cli.folder)?;

    if !cli.apply {
        if cli.json {
            println!("{}", to_json(&scanned)?);
        } else {
            render_entries(&scanned.items);
            render_scan_summary(&scanned);
        }
        return Ok(());
    }

    if scanned.needs_change == 0 {
        if cli.json {
            println!("{}", to_json(&scanned)?);
        } else {
            render_entries(&scanned.items);
            println!("更新が必要なファイルはありません。");
        }
        return Ok(());
    }

    if cli.created && !creation_time_supported() {
        eprintln!("作成日時の変更はWindowsのみ対応のため、スキップします。");
    }

    let options = ApplyOptions {
        rewrite_modify_access: !cli.no_modified,
        rewrite_creation: cli.created,
    };
    let applied = apply(&cli.folder, &scanned.items, &options, |event| {
        if !event.done {
            eprintln!(
                "{}/{} {}",
                event.processed,
                event.total,
                event.current_path.as_deref().unwrap_or("")
            );
        }
    })?;

    if cli.json {
        println!("{}", to_json(&applied)?);
    } else {
        render_entries(&applied.items);
        for detail in &applied.details {
            if let Some(reason) = &detail.reason {
                eprintln!("{}: {}", detail.file_name, reason);
            }
        }
        println!(
            "{}件のファイルのタイムスタンプを更新しました。",
            applied.updated
        );
    }
    Ok(())
}

fn render_entries(items: &[FileEntry]) {
    for item in items {
        println!(
            "{:<44} {:<19}  {}",
            item.file_name,
            item.extracted_datetime
                .as_deref()
                .unwrap_or(NO_DATE_PLACEHOLDER),
            item.status.label()
        );
    }
}

fn render_scan_summary(scanned: &ScanResponse) {
    println!(
        "対象 {} 件 / 要変更 {} / OK {} / 形式不明 {} / 拡張子対象外 {}",
        scanned.total,
        scanned.needs_change,
        scanned.up_to_date,
        scanned.no_match,
        scanned.skipped_by_extension
    );
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Io(e.to_string()))
}
