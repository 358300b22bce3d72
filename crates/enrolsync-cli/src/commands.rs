//! Command execution for the enrolment sync CLI.

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Context;
use tracing::{info, info_span};

use enrolsync_cli::pipeline::{
    build_associations, build_target, course_names, fetch_current, join_roster, load_inputs,
    resolve_course_ids, verify_accounts,
};
use enrolsync_ingest::{EnrolmentColumns, ModuleColumns};
use enrolsync_model::Association;
use enrolsync_moodle::{MoodleClient, MoodleConfig};
use enrolsync_reconcile::{UnenrolPolicy, reconcile};
use enrolsync_report::{write_actions, write_mapping_result};

use crate::cli::{InputArgs, MapArgs, SyncArgs};
use crate::types::{MapResult, SyncResult};

pub fn run_map(args: &MapArgs) -> anyhow::Result<MapResult> {
    let span = info_span!("map");
    let _guard = span.enter();
    let started = Instant::now();

    let inputs = load_inputs(
        &args.inputs.enrolment_file,
        &args.inputs.modules_file,
        &enrolment_columns(&args.inputs),
        &module_columns(&args.inputs),
    )?;
    let enrolment_rows = inputs.enrolments.rows.len();
    let dropped_enrolment_rows = inputs.enrolments.dropped;
    let module_rows = inputs.modules.rows.len();
    let dropped_module_rows = inputs.modules.dropped;

    let (tree, _index, mut associations) =
        build_associations(&inputs.enrolments.rows, inputs.modules.rows);

    let resolved_courses = if args.offline {
        info!("offline mode, course ids stay unresolved");
        0
    } else {
        let directory = connect()?;
        resolve_course_ids(&mut associations, &directory)
    };
    let unresolved_courses = distinct_shortnames(&associations) - resolved_courses;

    let rows = join_roster(&inputs.enrolments.rows, &associations);
    write_mapping_result(&args.output, &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(path = %args.output.display(), rows = rows.len(), "mapping result written");

    Ok(MapResult {
        enrolment_rows,
        dropped_enrolment_rows,
        module_rows,
        dropped_module_rows,
        timetable_entries: tree.len(),
        associations: associations.len(),
        resolved_courses,
        unresolved_courses,
        mapping_rows: rows.len(),
        output: Some(args.output.clone()),
        elapsed: started.elapsed(),
    })
}

pub fn run_sync(args: &SyncArgs) -> anyhow::Result<SyncResult> {
    let span = info_span!("sync");
    let _guard = span.enter();
    let started = Instant::now();

    let inputs = load_inputs(
        &args.inputs.enrolment_file,
        &args.inputs.modules_file,
        &enrolment_columns(&args.inputs),
        &module_columns(&args.inputs),
    )?;
    let enrolment_rows = inputs.enrolments.rows.len();
    let dropped_enrolment_rows = inputs.enrolments.dropped;
    let module_rows = inputs.modules.rows.len();
    let dropped_module_rows = inputs.modules.dropped;

    let (tree, _index, mut associations) =
        build_associations(&inputs.enrolments.rows, inputs.modules.rows);

    let directory = connect()?;
    let resolved_courses = resolve_course_ids(&mut associations, &directory);
    let unresolved_courses = distinct_shortnames(&associations) - resolved_courses;

    let rows = join_roster(&inputs.enrolments.rows, &associations);
    let map_elapsed = started.elapsed();
    let names = course_names(&associations);
    let target = build_target(&rows, &associations);
    let current = fetch_current(&names, &directory);

    let plan = reconcile(&current, &target, &names, &UnenrolPolicy::default());
    info!(
        to_enrol = plan.to_enrol.len(),
        to_unenrol = plan.to_unenrol.len(),
        protected = plan.protected.len(),
        "reconciliation plan computed"
    );
    let missing_accounts = verify_accounts(&plan.to_enrol, &directory);

    let mut outputs = Vec::new();
    if args.dry_run {
        info!("dry run, no files written");
    } else {
        let mapping_path = args.output_dir.join("mapping_result.csv");
        write_mapping_result(&mapping_path, &rows)
            .with_context(|| format!("writing {}", mapping_path.display()))?;
        outputs.push(mapping_path);

        let enrol_path = args.output_dir.join("to_enrol.csv");
        write_actions(&enrol_path, &plan.to_enrol)
            .with_context(|| format!("writing {}", enrol_path.display()))?;
        outputs.push(enrol_path);

        let unenrol_path = args.output_dir.join("to_unenrol.csv");
        write_actions(&unenrol_path, &plan.to_unenrol)
            .with_context(|| format!("writing {}", unenrol_path.display()))?;
        outputs.push(unenrol_path);
    }

    Ok(SyncResult {
        map: MapResult {
            enrolment_rows,
            dropped_enrolment_rows,
            module_rows,
            dropped_module_rows,
            timetable_entries: tree.len(),
            associations: associations.len(),
            resolved_courses,
            unresolved_courses,
            mapping_rows: rows.len(),
            output: None,
            elapsed: map_elapsed,
        },
        target_courses: target.course_count(),
        target_members: target.member_count(),
        current_members: current.member_count(),
        to_enrol: plan.to_enrol.len(),
        to_unenrol: plan.to_unenrol.len(),
        protected: plan.protected.len(),
        missing_accounts,
        outputs,
        dry_run: args.dry_run,
        elapsed: started.elapsed(),
    })
}

fn connect() -> anyhow::Result<MoodleClient> {
    let config = MoodleConfig::from_env()
        .context("loading Moodle connection settings from the environment")?;
    MoodleClient::new(config).context("building Moodle client")
}

fn distinct_shortnames(associations: &[Association]) -> usize {
    associations
        .iter()
        .map(|association| &association.shortname)
        .collect::<BTreeSet<_>>()
        .len()
}

fn enrolment_columns(inputs: &InputArgs) -> EnrolmentColumns {
    EnrolmentColumns {
        email: inputs.email_column.clone(),
        timetable_id: inputs.timetable_column.clone(),
    }
}

fn module_columns(inputs: &InputArgs) -> ModuleColumns {
    ModuleColumns {
        shortname: inputs.shortname_column.clone(),
        fullname: inputs.fullname_column.clone(),
    }
}
