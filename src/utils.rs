/// Appends extra CLI arguments to an action template, space separated.
///
/// Arguments are passed as typed: quoting is up to the user and the shell.
pub fn append_args(template: &str, args: &[String]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut expanded = template.to_string();
    expanded.push(' ');
    expanded.push_str(&args.join(" "));
    expanded
}
