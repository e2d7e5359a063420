use bit_streamer::{BitStreamer, StreamError, Utf8};

/// A position update as a game server might send it.
#[derive(Debug, PartialEq)]
struct Update {
    entity: u32,
    dx: i16,
    dy: i16,
    grounded: bool,
    name: String,
}

fn main() {
    println!("=== Framed Message Example ===\n");

    let updates = [
        Update {
            entity: 17,
            dx: -3,
            dy: 12,
            grounded: true,
            name: "scout".into(),
        },
        Update {
            entity: 4096,
            dx: 250,
            dy: -250,
            grounded: false,
            name: "überheavy".into(),
        },
    ];

    let mut writer = BitStreamer::new();
    for update in &updates {
        let frame = match encode(&mut writer, update) {
            Ok(frame) => frame,
            Err(err) => {
                eprintln!("encode failed: {err}");
                return;
            }
        };
        println!("  {:?}", update);
        println!("  -> {} bytes: {:02x?}", frame.len(), frame);

        match decode(&frame) {
            Ok(decoded) => {
                assert_eq!(&decoded, update);
                println!("  <- decoded ok\n");
            }
            Err(err) => eprintln!("decode failed: {err}"),
        }
    }

    // A fixed buffer never grows.
    let mut fixed = [0u8; 8];
    let mut small = BitStreamer::new();
    if small.reset_write_borrowed(&mut fixed).is_ok() {
        let result = encode_into(&mut small, &updates[1]);
        println!("Encoding into 8 borrowed bytes: {:?}", result.map_err(|e| e.kind()));
    }
}

/// Writes one length-prefixed frame, reusing the writer's allocation.
fn encode(writer: &mut BitStreamer<'_>, update: &Update) -> Result<Vec<u8>, StreamError> {
    writer.reset_write()?;
    encode_into(writer, update)?;
    Ok(writer.written().to_vec())
}

fn encode_into(writer: &mut BitStreamer<'_>, update: &Update) -> Result<(), StreamError> {
    writer.reserve_size_prefix()?;
    writer.write_u32_bits(update.entity, 20)?;
    writer.write_i16_bits(update.dx, 10)?;
    writer.write_i16_bits(update.dy, 10)?;
    writer.write_bool(update.grounded)?;
    writer.write_string(&update.name, &Utf8)?;
    writer.prefix_size()?;
    Ok(())
}

fn decode(frame: &[u8]) -> Result<Update, StreamError> {
    let mut reader = BitStreamer::new();
    let mut reader = reader.scoped();
    reader.reset_read_borrowed(frame)?;

    let size = reader.read_u32()? as usize;
    assert_eq!(size, frame.len());

    Ok(Update {
        entity: reader.read_u32_bits(20)?,
        dx: reader.read_i16_bits(10)?,
        dy: reader.read_i16_bits(10)?,
        grounded: reader.read_bool()?,
        name: reader.read_string(&Utf8)?,
    })
}
