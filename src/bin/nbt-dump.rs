use clap::{App, Arg};
use sch2bob::{de, NamedTag, Value};
use std::io::{self, BufReader, Read, Write};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn dump_value<W: Write>(
    out: &mut W,
    name: Option<&str>,
    value: &Value,
    indent: usize,
) -> Result<()> {
    let label = match name {
        Some(name) => format!("{:?} ", name),
        None => String::new(),
    };

    match value {
        Value::Compound(entries) => {
            writeln!(
                out,
                "{:indent$}{}Compound ({} entries)",
                "",
                label,
                entries.len(),
                indent = indent
            )?;
            for NamedTag { name, value } in entries {
                dump_value(out, Some(&*name.to_str_lossy()), value, indent + 4)?;
            }
        }
        Value::List(list) => {
            writeln!(
                out,
                "{:indent$}{}List of {:?} ({} entries)",
                "",
                label,
                list.element_tag(),
                list.len(),
                indent = indent
            )?;
            for v in list {
                dump_value(out, None, v, indent + 4)?;
            }
        }
        Value::ByteArray(bs) => {
            writeln!(
                out,
                "{:indent$}{}ByteArray ({} bytes)",
                "",
                label,
                bs.len(),
                indent = indent
            )?;
        }
        other => writeln!(out, "{:indent$}{}{:?}", "", label, other, indent = indent)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    let matches = App::new("nbt-dump")
        .about("Print the tag tree of a decompressed NBT file")
        .arg(Arg::with_name("file").takes_value(true).required(false))
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .required(false),
        )
        .get_matches();

    let input: Box<dyn Read> = match matches.value_of("file") {
        Some(path) => Box::new(std::fs::File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let root = de::from_reader(BufReader::new(input))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if matches.is_present("json") {
        serde_json::to_writer_pretty(&mut out, &root)?;
        writeln!(out)?;
    } else {
        dump_value(&mut out, Some(&*root.name.to_str_lossy()), &root.value, 0)?;
    }

    Ok(())
}
