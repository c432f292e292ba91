use patchbay_context::{node::AudioNode, Context, Options};

fn main() -> Result<(), patchbay_context::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut context = Context::new(Options {
        sample_rate: Some(44100.0),
        num_output_channels: 2,
    })?;
    context.set_on_state_change(|state| println!("state: {state}"));

    // source -> gain -> delay -> destination, with the delay fed back into the gain.
    let mut source = context.create_buffer_source();
    let gain = context.create_gain();
    let delay = context.create_delay(Some(0.5))?;
    source.connect(&gain)?;
    gain.connect(&delay)?;
    delay.connect(&gain)?;
    delay.connect(context.destination())?;
    println!(
        "source reaches destination: {}",
        source.connected_to(context.destination())
    );

    source.set_buffer(Some(context.create_buffer(2, 44100, 44100.0)?));
    source.set_on_ended(|| println!("source ended"));
    source.start(0.0, 0.0, None)?;

    gain.gain()
        .set_value_at_time(0.0, 0.0)?
        .linear_ramp_to_value_at_time(1.0, 0.5)?
        .set_target_at_time(0.25, 0.5, 0.1)?;
    delay
        .delay_time()
        .set_value_at_time(0.05, 0.0)?
        .exponential_ramp_to_value_at_time(0.25, 1.0)?;

    context.resume().into_inner().transpose()?;
    for _ in 0..8 {
        context.advance_frames(6615)?;
        println!(
            "t = {:.3}: gain = {:.4}, delay = {:.4}",
            context.current_time(),
            gain.gain().value(),
            delay.delay_time().value()
        );
    }

    source.stop(context.current_time())?;
    context.close().into_inner().transpose()?;
    Ok(())
}

