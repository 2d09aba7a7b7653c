use anyhow::Result;
use household_merge::codec::{read_table, write_table};
use household_merge::{MergeError, MergeFields, Pipeline, PipelineResult};

const HEADER: &str = "Account Name,First Name,Last Name,Email\n";

fn run_with(fields: MergeFields, body: &str) -> Result<PipelineResult> {
    Ok(Pipeline::new(fields, false).run(format!("{HEADER}{body}").as_bytes())?)
}

fn run(body: &str) -> Result<PipelineResult> {
    run_with(MergeFields::default(), body)
}

fn known_as_and_to(result: &PipelineResult) -> Vec<(String, String)> {
    result
        .table
        .rows
        .iter()
        .map(|r| (r.known_as.clone(), r.to.clone()))
        .collect()
}

fn pair(name: &str, to: &str) -> (String, String) {
    (name.to_string(), to.to_string())
}

#[test]
fn test_single_household_with_one_addressed_member() -> Result<()> {
    let result = run("Smith Household,John,Smith,j@x.com\nSmith Household,Jane,Smith,\n")?;
    assert_eq!(known_as_and_to(&result), vec![pair("John", "j@x.com")]);
    Ok(())
}

#[test]
fn test_joint_household_without_emails() -> Result<()> {
    let result = run("A & B Household,A,X,\nA & B Household,B,X,\n")?;
    assert_eq!(known_as_and_to(&result), vec![pair("A and B X", "")]);
    Ok(())
}

#[test]
fn test_unrelated_households_sharing_a_short_name() -> Result<()> {
    let result = run("John Smith Household,John,Smith,js@x.com\nJohn Doe Household,John,Doe,jd@x.com\n")?;
    assert_eq!(
        known_as_and_to(&result),
        vec![pair("John", "jd@x.com"), pair("John", "js@x.com")]
    );
    assert_eq!(result.stats.collisions, 1);
    Ok(())
}

#[test]
fn test_mixed_export_end_to_end() -> Result<()> {
    let fields = MergeFields {
        cc: String::new(),
        bcc: "archive@x.com".to_string(),
        subject: "Newsletter".to_string(),
        send_as: "office@x.com".to_string(),
        attachment: "spring.pdf".to_string(),
    };
    let result = run_with(
        fields,
        concat!(
            "John & Jane Smith Household,John,Smith,john@x.com\n",
            "John & Jane Smith Household,Jane,Smith,jane@x.com\n",
            "John & Jane Smith Household,Tim,Smith,tim@x.com\n",
            "John & Jane Smith Household,Sue,Smith,\n",
            "Bob Jones Household,Bob,Jones,\n",
            "Al & Bo Roe Household,Al,Roe,\n",
            "Al & Bo Roe Household,Bo,Roe,\n",
            "Kim Lee Household,Kim,Lee,kim@x.com\n",
            "Kim Lee Household,Kid,Lee,john@x.com\n",
        ),
    )?;

    assert_eq!(
        known_as_and_to(&result),
        vec![
            pair("John & Jane", "john@x.com;jane@x.com"),
            pair("Kim", "kim@x.com"),
            pair("Al and Bo Roe", ""),
            pair("Bob Jones", ""),
            pair("Tim", "tim@x.com"),
        ]
    );

    let encoded = write_table(&result.table)?;
    let first_lines: Vec<&str> = encoded.lines().take(2).collect();
    assert_eq!(
        first_lines,
        vec![
            r#""Known As","To","CC","BCC","Subject","Send As","Attachment1""#,
            r#""John & Jane","john@x.com;jane@x.com","","archive@x.com","Newsletter","office@x.com","spring.pdf""#,
        ]
    );
    assert_eq!(encoded.lines().count(), 6);
    Ok(())
}

#[test]
fn test_short_header_aliases() -> Result<()> {
    let result = Pipeline::new(MergeFields::default(), false)
        .run(b"Account Name,First,Last,Email\nLee Household,Lee,Park,lee@x.com\n")?;
    assert_eq!(known_as_and_to(&result), vec![pair("Lee", "lee@x.com")]);
    Ok(())
}

#[test]
fn test_surname_per_name_policy_end_to_end() -> Result<()> {
    let result = Pipeline::new(MergeFields::default(), true)
        .run(format!("{HEADER}Al & Bo Household,Al,Roe,\nAl & Bo Household,Bo,Poe,\n").as_bytes())?;
    assert_eq!(known_as_and_to(&result), vec![pair("Al Roe and Bo Poe", "")]);
    Ok(())
}

#[test]
fn test_structural_errors_surface_verbatim() {
    let missing = Pipeline::new(MergeFields::default(), false)
        .run(b"Account Name,Email\nx,y\n")
        .unwrap_err();
    assert_eq!(missing.to_string(), "Missing required column(s): First Name, Last Name");

    let empty = Pipeline::new(MergeFields::default(), false).run(b"").unwrap_err();
    assert!(matches!(empty, MergeError::EmptyInput));
}

#[test]
fn test_output_fed_back_does_not_duplicate_emails() -> Result<()> {
    let result = run(concat!(
        "Ann Lee Household,Ann,Lee,a@x.com\n",
        "Ann Lee Household,Ann,Lee,a@x.com\n",
        "Ann Lee Household,Ann,Lee,b@x.com\n",
        "Ann Lee Household,Ann,Lee,a@x.com\n",
    ))?;
    let encoded = write_table(&result.table)?;

    // Re-read with the plain comma splitter; quotes stay attached to the fields.
    let reread = read_table(encoded.as_bytes())?;
    assert_eq!(reread.rows.len(), 1);
    let to = reread.rows[0].1[1].trim_matches('"').to_string();
    let emails: Vec<&str> = to.split(';').collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let body = "Kim Lee Household,Kim,Lee,kim@x.com\nBob Jones Household,Bob,Jones,\n";
    let first = run(body)?;
    let second = run(body)?;
    assert_eq!(first.table, second.table);
    assert_eq!(first.stats, second.stats);
    Ok(())
}
