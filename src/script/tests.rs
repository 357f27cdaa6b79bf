use crate::script::args_files::ArgsFiles;
use crate::script::platform::Platform;
use crate::script::template::join_classpath;
use crate::script::{preview_command, process_command};
use std::fs;
use std::path::PathBuf;

fn long_classpath(count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| PathBuf::from(format!("/home/dev/.m2/repository/org/example/artifact-{i}/1.0.0/artifact-{i}-1.0.0.jar")))
        .collect()
}

// Path of the first "@file" argument of a processed command
fn args_file_in(cmd: &str) -> PathBuf {
    let arg = cmd.split(' ').find(|w| w.starts_with('@')).unwrap();
    PathBuf::from(&arg[1..])
}

#[test]
fn test_short_classpath_stays_inline() {
    let dir = tempfile::tempdir().unwrap();
    let platform = Platform::posix("/home/dev");
    let cp = vec![PathBuf::from("/x/a.jar"), PathBuf::from("/x/b.jar")];
    let mut files = ArgsFiles::new_in(dir.path());

    let cmd = process_command("java -cp {{deps}} M", &cp, &platform, &mut files).unwrap();

    assert_eq!(cmd, "java -cp /x/a.jar:/x/b.jar M");
    assert_eq!(files.len(), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_long_classpath_goes_to_args_file() {
    let dir = tempfile::tempdir().unwrap();
    let platform = Platform::posix("/home/dev");
    let cp = long_classpath(500);
    let joined = join_classpath(&cp, &platform);
    assert!(joined.len() > 32000);
    let mut files = ArgsFiles::new_in(dir.path());

    let cmd = process_command("java -cp {{deps}} Main", &cp, &platform, &mut files).unwrap();

    assert_eq!(files.len(), 1);
    let path = args_file_in(&cmd);
    assert_eq!(path.parent().unwrap(), dir.path());
    assert_eq!(cmd, format!("java -cp @{} Main", path.display()));
    assert_eq!(fs::read_to_string(&path).unwrap(), joined);
}

#[test]
fn test_windows_limit_is_lower() {
    let dir = tempfile::tempdir().unwrap();
    let platform = Platform::windows("C:\\Users\\dev");
    let cp: Vec<PathBuf> = (0..300)
        .map(|i| PathBuf::from(format!("C:\\m2\\org\\example\\lib-{i}\\lib-{i}-1.0.jar")))
        .collect();
    let joined = join_classpath(&cp, &platform);
    assert!(joined.len() > 8000 && joined.len() < 32000);
    let mut files = ArgsFiles::new_in(dir.path());

    let cmd = process_command("javac -cp {{deps}} Main.java", &cp, &platform, &mut files).unwrap();

    assert_eq!(files.len(), 1);
    assert!(cmd.starts_with("javac -cp @"));
    assert!(cmd.ends_with(" Main.java"));
}

#[test]
fn test_marked_template_is_not_replanned() {
    let dir = tempfile::tempdir().unwrap();
    let platform = Platform::posix("/home/dev");
    let cp = long_classpath(500);
    let mut files = ArgsFiles::new_in(dir.path());

    // Already uses markers: {{deps}} is not wrapped, so no args file
    let cmd = process_command("java -cp {{deps}} {./src/Main.java}", &cp, &platform, &mut files)
        .unwrap();

    assert_eq!(files.len(), 0);
    assert!(cmd.ends_with(" ./src/Main.java"));
}

#[test]
fn test_args_files_removed_after_scope() {
    let dir = tempfile::tempdir().unwrap();
    let platform = Platform::posix("/home/dev");
    let cp = long_classpath(500);

    let path = {
        let mut files = ArgsFiles::new_in(dir.path());
        let cmd = process_command("java -cp {{deps}} Main", &cp, &platform, &mut files).unwrap();
        let path = args_file_in(&cmd);
        assert!(path.exists());
        path
    };

    assert!(!path.exists());
}

#[test]
fn test_planned_paths_render_per_platform() {
    let template = "javac -d out src/org/Main.java ; java -cp out:{{deps}} org.Main";
    let cp = vec![PathBuf::from("/x/a.jar")];

    let posix = Platform::posix("/home/dev");
    assert_eq!(
        preview_command(template, &cp, &posix),
        "javac -d out ./src/org/Main.java ; java -cp ./out:/x/a.jar org.Main"
    );

    let win = Platform::windows("C:\\Users\\dev");
    let cp = vec![PathBuf::from("lib\\a.jar")];
    assert_eq!(
        preview_command(template, &cp, &win),
        "javac -d out src\\org\\Main.java & java -cp out;lib\\a.jar org.Main"
    );
}

#[test]
fn test_classpath_next_to_deps_renders() {
    let posix = Platform::posix("/home/dev");
    let cp = vec![PathBuf::from("/x/a.jar"), PathBuf::from("/x/b.jar")];
    assert_eq!(
        preview_command("java -cp {{deps}}:out/classes Main", &cp, &posix),
        "java -cp /x/a.jar:/x/b.jar:out/classes Main"
    );
    assert_eq!(
        preview_command("java -cp .:{{deps}} MainClass", &cp, &posix),
        "java -cp .:/x/a.jar:/x/b.jar MainClass"
    );
    assert_eq!(
        preview_command("java -cp /opt/x.jar:{{deps}} Main", &cp, &posix),
        "java -cp /opt/x.jar:/x/a.jar:/x/b.jar Main"
    );
}

#[test]
fn test_absolute_windows_deps_keep_drive() {
    let win = Platform::windows("C:\\Users\\dev");
    let cp = vec![PathBuf::from("C:\\m2\\a.jar"), PathBuf::from("C:\\m2\\b.jar")];
    assert_eq!(
        preview_command("java -cp out:{{deps}} Main", &cp, &win),
        "java -cp out;C:\\m2\\a.jar;C:\\m2\\b.jar Main"
    );

    // Same through an args file
    let dir = tempfile::tempdir().unwrap();
    let mut files = ArgsFiles::new_in(dir.path());
    let many: Vec<PathBuf> = (0..300)
        .map(|i| PathBuf::from(format!("C:\\m2\\repository\\lib-{:04}.jar", i)))
        .collect();
    let cmd = process_command("java -cp out:{{deps}} Main", &many, &win, &mut files).unwrap();
    let content = fs::read_to_string(args_file_in(&cmd)).unwrap();
    assert!(content.starts_with("out;C:\\m2\\repository\\lib-0000.jar;C:\\"));
    assert!(!content.contains(";C;"));
}

#[cfg(unix)]
#[test]
fn test_execute_script_verbose() {
    use std::collections::HashMap;

    let platform = Platform::posix("/home/dev");
    let cp = vec![PathBuf::from("/x/a.jar"), PathBuf::from("/x/b.jar")];
    let mut out = Vec::new();

    let code = crate::script::execute_script(
        "echo {{deps}}",
        &cp,
        &platform,
        &HashMap::new(),
        true,
        &mut out,
    )
    .unwrap();

    assert_eq!(code, 0);
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out, "> echo /x/a.jar:/x/b.jar\n/x/a.jar:/x/b.jar\n");
}
