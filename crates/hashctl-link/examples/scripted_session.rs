//! Scripted end-to-end session against the simulated device
//!
//! Programs a job, retunes the core clock, injects a found result from the
//! core domain, and drains it back over the link — the full round a mining
//! host would make.

use hashctl_link::host;
use hashctl_link::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("hashctl_link=debug")
        .init();

    let cfg = FreqConfig::new(100, 400, 200)?;
    let mut ctl = Controller::new(cfg);

    println!("device version: {:#010x}", host::read_reg(&mut ctl, 0x0));

    // program a job: midstate, data, then the commit register last
    for addr in 0x1..=0xA_u8 {
        host::write_reg(&mut ctl, addr, 0x0101_0101 * u32::from(addr));
    }
    host::write_reg(&mut ctl, 0xB, 0x1A2B_3C4D);

    // let the core domain pick it up
    let mut job = None;
    for _ in 0..8 {
        let out = ctl.tick_core(CoreInput::idle());
        if out.new_job {
            job = Some(out.job);
        }
    }
    let job = job.expect("job never crossed");
    println!("core job data[2]: {:#010x}", job.data[2]);

    // ask for 350 MHz and walk the synthesizer reprogram to completion
    host::write_reg(&mut ctl, 0xD, 350);
    loop {
        ctl.tick_clock(true);
        if ctl.sequencer_idle() {
            break;
        }
    }
    println!("applied multiplier: {}", ctl.applied_multiplier());

    // the core finds something
    ctl.tick_core(CoreInput::result(0x600D_BEEF));
    println!("result register: {:#010x}", host::read_reg(&mut ctl, 0xE));
    println!("result register: {:#010x} (drained)", host::read_reg(&mut ctl, 0xE));

    Ok(())
}
