use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context};
use clap::{command, Arg, ArgAction, ArgMatches, Command};
use folio::{
    config::DEFAULT_NOTES_DIR,
    export::export,
    paginate, Config, DateFallback, NoteQuery, NoteRepository,
};
use log::info;
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .args(&[
            Arg::new("notes_dir")
                .long("notes-dir")
                .help("Directory of note sources (<id>.md)")
                .env("FOLIO_NOTES_DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_NOTES_DIR),
            Arg::new("date_fallback")
                .long("date-fallback")
                .help("Date of notes without one in front-matter: `modified` or `now`")
                .env("FOLIO_DATE_FALLBACK")
                .value_parser(clap::value_parser!(DateFallback))
                .default_value("modified"),
        ])
        .subcommand(Command::new("ids").about("Print the id of every note"))
        .subcommand(
            Command::new("list")
                .about("Print note metadata, newest first")
                .args(&[
                    Arg::new("tag").long("tag").help("Only notes with this exact tag"),
                    Arg::new("search")
                        .long("search")
                        .help("Case-insensitive match on title, excerpt and tags"),
                    Arg::new("page")
                        .long("page")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                    Arg::new("per_page")
                        .long("per-page")
                        .value_parser(clap::value_parser!(usize)),
                ]),
        )
        .subcommand(
            Command::new("show")
                .about("Print a single note")
                .args(&[
                    Arg::new("id").required(true),
                    Arg::new("html")
                        .long("html")
                        .help("Print only the rendered HTML")
                        .action(ArgAction::SetTrue),
                ]),
        )
        .subcommand(
            Command::new("export")
                .about("Write the notes as JSON files. Existing contents will be removed.")
                .arg(
                    Arg::new("out_dir")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("out"),
                ),
        )
}

fn list(repository: &NoteRepository, matches: &ArgMatches) -> anyhow::Result<()> {
    let notes = repository.list_notes_sorted()?;
    if notes.is_empty() {
        info!("No notes yet in {:?}", repository.notes_dir());
    }
    let query = NoteQuery {
        tag: matches.get_one::<String>("tag").cloned(),
        search: matches.get_one::<String>("search").cloned(),
    };
    let filtered: Vec<_> = query.filter(&notes);
    let page = matches.get_one::<usize>("page").copied().unwrap_or(1);
    let per_page = matches
        .get_one::<usize>("per_page")
        .copied()
        .unwrap_or(repository.config().per_page);

    print_json(&paginate(&filtered, page, per_page))
}

fn show(repository: &NoteRepository, matches: &ArgMatches) -> anyhow::Result<()> {
    let Some(id) = matches.get_one::<String>("id") else {
        bail!("id is required.");
    };
    let Some(note) = repository
        .get_note(id)
        .with_context(|| format!("while loading note {id:?}"))?
    else {
        bail!("note not found: {id}");
    };

    if matches.get_flag("html") {
        print!("{}", note.content_html);
        Ok(())
    } else {
        print_json(&note)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let notes_dir = matches
        .get_one::<PathBuf>("notes_dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_DIR));
    let date_fallback = matches
        .get_one::<DateFallback>("date_fallback")
        .copied()
        .unwrap_or_default();
    let repository = NoteRepository::new(Config::new(notes_dir).with_date_fallback(date_fallback));

    match matches.subcommand() {
        Some(("ids", _)) => print_json(&repository.list_note_ids()?),
        Some(("list", sub)) => list(&repository, sub),
        Some(("show", sub)) => show(&repository, sub),
        Some(("export", sub)) => {
            let out_dir = sub
                .get_one::<PathBuf>("out_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("out"));
            let written = export(&repository, &out_dir)?;
            println!("{written} notes exported to {}", out_dir.display());
            Ok(())
        }
        _ => bail!("unknown subcommand."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn parses_global_and_list_arguments() {
        let matches = cli()
            .try_get_matches_from([
                "folio",
                "--notes-dir",
                "notes",
                "--date-fallback",
                "now",
                "list",
                "--tag",
                "Design",
                "--page",
                "2",
            ])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("notes_dir"),
            Some(&PathBuf::from("notes"))
        );
        assert_eq!(
            matches.get_one::<DateFallback>("date_fallback"),
            Some(&DateFallback::Now)
        );
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "list");
        assert_eq!(sub.get_one::<String>("tag").map(String::as_str), Some("Design"));
        assert_eq!(sub.get_one::<usize>("page"), Some(&2));
    }

    #[test]
    fn rejects_unknown_date_fallback() {
        assert!(cli()
            .try_get_matches_from(["folio", "--date-fallback", "yesterday", "ids"])
            .is_err());
    }
}
