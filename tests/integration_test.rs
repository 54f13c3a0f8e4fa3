use exam_question_extract::services::paper_store::{StoredPaper, StoredQuestion};
use exam_question_extract::utils::logging;
use exam_question_extract::{App, Config};
use std::fs;
use std::path::PathBuf;

fn setup_folders(tag: &str) -> (PathBuf, PathBuf) {
    let base = std::env::temp_dir().join(format!("exam_extract_it_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&base);

    let upload = base.join("uploads");
    let output = base.join("extracted");
    fs::create_dir_all(&upload).unwrap();
    fs::create_dir_all(&output).unwrap();
    (upload, output)
}

fn write_paper(upload: &PathBuf, stem: &str, title: &str, text: &str) {
    fs::write(
        upload.join(format!("{}.toml", stem)),
        format!(
            "title = \"{}\"\nsubject = \"physics\"\nyear = 2024\nexam_type = \"midterm\"\ntext_file = \"{}.txt\"\n",
            title, stem
        ),
    )
    .unwrap();
    fs::write(upload.join(format!("{}.txt", stem)), text).unwrap();
}

fn test_config(upload: &PathBuf, output: &PathBuf) -> Config {
    Config {
        upload_folder: upload.to_string_lossy().to_string(),
        output_folder: output.to_string_lossy().to_string(),
        output_log_file: output.join("output.txt").to_string_lossy().to_string(),
        max_concurrent_papers: 2,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_end_to_end_extraction_pipeline() {
    // 初始化日志
    logging::init();

    let (upload, output) = setup_folders("pipeline");

    // 两份试卷：清单按文件名排序决定提交顺序
    write_paper(
        &upload,
        "a_physics",
        "物理期中卷",
        "Physics Midterm\n\n1. What is the derivative of velocity\nwith respect to time?\n2. Define momentum",
    );
    write_paper(
        &upload,
        "b_biology",
        "生物期中卷",
        "3) Name the powerhouse of the cell",
    );

    let config = test_config(&upload, &output);
    let app = App::initialize(config).expect("初始化应用失败");
    app.run().await.expect("运行应用失败");

    // 检查试卷行
    let papers_content = fs::read_to_string(output.join("exam_papers.jsonl")).unwrap();
    let papers: Vec<StoredPaper> = papers_content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(papers.len(), 2);
    // 落盘顺序与提交顺序一致
    assert_eq!(papers[0].title, "物理期中卷");
    assert_eq!(papers[1].title, "生物期中卷");
    assert_eq!(papers[0].total_questions, 2);
    assert_eq!(papers[1].total_questions, 1);
    assert_eq!(papers[0].status, "completed");

    // 检查题目行
    let questions_content = fs::read_to_string(output.join("questions.jsonl")).unwrap();
    let questions: Vec<StoredQuestion> = questions_content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(questions.len(), 3);

    // 第一份试卷的两道题按输入顺序出现
    assert_eq!(questions[0].paper_id, papers[0].id);
    assert_eq!(questions[0].record.question_number, 1);
    assert_eq!(
        questions[0].record.question_text,
        "What is the derivative of velocity with respect to time?"
    );
    assert!(questions[0]
        .record
        .keywords
        .contains(&"derivative".to_string()));
    assert_eq!(questions[1].record.question_number, 2);

    // 第二份试卷的题目关联到第二个试卷ID
    assert_eq!(questions[2].paper_id, papers[1].id);
    assert_eq!(questions[2].record.question_number, 3);
    assert_eq!(
        questions[2].record.question_text,
        "Name the powerhouse of the cell"
    );

    // 元数据落在约定范围内
    for q in &questions {
        assert!((1..=10).contains(&q.record.marks));
        assert!(q.record.keywords.len() <= 5);
    }

    let _ = fs::remove_dir_all(upload.parent().unwrap());
}

#[tokio::test]
async fn test_markerless_paper_is_not_persisted() {
    logging::init();

    let (upload, output) = setup_folders("empty");
    write_paper(
        &upload,
        "no_questions",
        "空白卷",
        "Just instructions.\nNo numbered items anywhere.",
    );

    let config = test_config(&upload, &output);
    let app = App::initialize(config).expect("初始化应用失败");
    app.run().await.expect("运行应用失败");

    // 没有题目的试卷不写任何行
    assert!(!output.join("exam_papers.jsonl").exists());
    assert!(!output.join("questions.jsonl").exists());

    let _ = fs::remove_dir_all(upload.parent().unwrap());
}

#[tokio::test]
async fn test_empty_upload_folder_is_ok() {
    logging::init();

    let (upload, output) = setup_folders("noop");
    let config = test_config(&upload, &output);

    let app = App::initialize(config).expect("初始化应用失败");
    // 没有清单时正常结束，不报错
    app.run().await.expect("运行应用失败");

    let _ = fs::remove_dir_all(upload.parent().unwrap());
}
