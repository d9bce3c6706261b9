use autorun::AutorunError;

pub fn format_error(err: &anyhow::Error) -> String {
    if let Some(autorun) = err.downcast_ref::<AutorunError>() {
        return format!("autorun: {autorun}");
    }

    format!("autorun: {err:#}")
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", format_error(err));
}

/// Process exit status: the OS error code when one is carried, else 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<AutorunError>()
        .map(AutorunError::exit_code)
        .unwrap_or(1);

    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}
