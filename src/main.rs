//! MORPH demo: a chain of encrypted AND / XOR gates checked against the clear computation.
//!
//! Usage: `morph-demo [params.json] [steps]`

use std::error::Error;
use std::time::Instant;

use csv::Writer;
use morph_core::{Algebra, Params, RingContext, RingElement, SecretKey};
use rand::{thread_rng, Rng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => Params::from_json(&std::fs::read_to_string(path)?)?,
        None => Params::default(),
    };
    let steps: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(12);

    println!("Initializing MORPH with n = {}, steps = {}", params.dimension, steps);
    let ctx = RingContext::new(params.dimension)?;
    let mut rng = thread_rng();
    let sk = SecretKey::generate(&ctx, &params, &mut rng)?;
    let alg = Algebra::new(&ctx);

    // word-level XOR
    if params.dimension >= morph_core::codec::WORD_BITS {
        let (word, mask): (u32, u32) = (rng.gen(), rng.gen());
        let masked = alg.add(&sk.encrypt_u32(word, &mut rng)?, &sk.encrypt_u32(mask, &mut rng)?)?;
        let got = sk.decrypt_u32(&masked)?;
        println!("{word:#010x} ^ {mask:#010x} = {got:#010x} (expected {:#010x})", word ^ mask);
    }

    let mut wtr = Writer::from_path("morph_stats.csv")?;
    wtr.write_record(["index", "op", "size", "depth", "time_ms"])?;

    let mut cur: i64 = rng.gen_range(0..=1);
    let mut cipher = sk.encrypt(&RingElement::constant(cur), &mut rng)?;
    let mut successful_ops = 0;
    let start = Instant::now();

    for i in 0..steps {
        let bit: i64 = rng.gen_range(0..=1);
        let fresh = sk.encrypt(&RingElement::constant(bit), &mut rng)?;
        let and_gate = rng.gen_bool(0.5);

        let op_start = Instant::now();
        cipher = if and_gate {
            alg.mult(&cipher, &fresh)?
        } else {
            alg.add(&cipher, &fresh)?
        };
        let elapsed_ms = op_start.elapsed().as_secs_f64() * 1000.0;
        cur = if and_gate { cur & bit } else { cur ^ bit };

        wtr.write_record([
            i.to_string(),
            if and_gate { "and" } else { "xor" }.to_string(),
            cipher.size().to_string(),
            cipher.depth.to_string(),
            format!("{elapsed_ms:.6}"),
        ])?;

        let decrypted = sk.decrypt_element(&cipher)?.coeff(0).rem_euclid(2);
        if decrypted == cur {
            successful_ops += 1;
        } else {
            warn!(step = i, expected = cur, got = decrypted, "decryption mismatch");
            break;
        }
    }
    wtr.flush()?;

    let total_time = start.elapsed();
    info!(?total_time, successful_ops, "chain finished");
    println!("\nTest completed:");
    println!("Total time: {total_time:?}");
    println!("Successful operations: {successful_ops}/{steps}");
    println!("Final ciphertext size: {} (depth {})", cipher.size(), cipher.depth);
    Ok(())
}
