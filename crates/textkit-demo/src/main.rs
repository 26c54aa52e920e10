use std::io::{self, Write};

use textkit::{
    fmt::{align_left, dec, fixed, hex, sci, with, FieldFormatter, StrFormatter},
    RefTextBuffer, TextBuffer,
};

struct Sample {
    name: &'static str,
    id: u32,
    reading: f64,
    delta: i64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "intake",
        id: 0x1f,
        reading: 21.5,
        delta: 3,
    },
    Sample {
        name: "exhaust",
        id: 0x2a0,
        reading: 48.125,
        delta: -12,
    },
    Sample {
        name: "ambient",
        id: 0x7,
        reading: 0.000314,
        delta: 0,
    },
];

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut table = TextBuffer::new();
    let name_column = FieldFormatter::new(StrFormatter, align_left(10));

    for sample in SAMPLES {
        table
            .append(with(sample.name, name_column))
            .append(with(sample.id, hex().with_pad_zeros(true)).width(4))
            .append(' ')
            .append(with(sample.reading, fixed().with_precision(2)).width(8))
            .append(' ')
            .append(with(sample.reading, sci().with_precision(3)).width(11))
            .append(' ')
            .append(with(sample.delta, dec().with_plus_sign(true)).width(4))
            .append('\n');
    }

    log::info!(
        "Rendered {} row(s) into {} byte(s) (capacity {}).",
        SAMPLES.len(),
        table.len(),
        table.capacity()
    );

    let mut stdout = io::stdout().lock();
    table.output(&mut stdout)?;

    // A fixed slot that must never be silently truncated.
    let mut slot = [0u8; 10];
    let mut field = RefTextBuffer::new(&mut slot);

    for sample in SAMPLES {
        field.reset();

        let fitted = field
            .append(sample.name)
            .and_then(|field| field.append('#'))
            .and_then(|field| field.append(sample.id))
            .map(|_| ());

        match fitted {
            Ok(()) => writeln!(stdout, "slot: {field}")?,
            Err(err) => log::warn!("Skipped {}: {err}", sample.name),
        }
    }

    table.reset();
    log::info!("Table buffer back to {} byte(s).", table.capacity());

    Ok(())
}
