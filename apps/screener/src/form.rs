//! Form boundary — the fields an operator fills in, plus the preset job
//! templates carried over from the web form. Owns no normalization logic.

use std::io::{self, BufRead, Write};

/// Raw, unvalidated form fields. `top_n` stays signed here; the Query Builder
/// clamps it on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFormInput {
    pub job_title: String,
    pub requirements: String,
    pub top_n: i64,
}

pub const DEFAULT_JOB_TITLE: &str = "高级数据科学家";
pub const DEFAULT_TOP_N: i64 = 10;

const SENIOR_DATA_SCIENTIST: &str = "要求:
1. 5年以上数据科学相关经验
2. 精通Python和机器学习库（如scikit-learn, TensorFlow, PyTorch）
3. 有深度学习项目经验，熟悉CNN、RNN等模型
4. 良好的沟通能力和团队协作精神
5. 熟悉大数据处理技术（如Spark, Hadoop）
6. 有团队管理经验者优先";

const PRODUCT_MANAGER: &str = "要求:
1. 3年以上产品管理经验，有成功产品案例
2. 熟悉产品生命周期管理，能独立负责产品规划
3. 具备良好的市场洞察力和用户需求分析能力
4. 熟练使用Axure、Figma等原型设计工具
5. 具备优秀的沟通协调能力，能有效推动跨部门合作
6. 有互联网或科技行业背景优先";

const FRONTEND_ENGINEER: &str = "要求:
1. 3年以上前端开发经验，精通Vue.js或React框架
2. 熟练掌握HTML5、CSS3、JavaScript(ES6+)
3. 有响应式设计和移动端开发经验
4. 熟悉Webpack等构建工具和npm生态系统
5. 了解前端性能优化和浏览器兼容性处理
6. 有良好的代码规范意识和团队协作能力";

/// Built-in presets for common roles, keyed by job title.
pub const JOB_TEMPLATES: [(&str, &str); 3] = [
    ("高级数据科学家", SENIOR_DATA_SCIENTIST),
    ("产品经理", PRODUCT_MANAGER),
    ("前端工程师", FRONTEND_ENGINEER),
];

/// Looks up the preset requirement body for a job title, if one exists.
pub fn template_for(job_title: &str) -> Option<&'static str> {
    JOB_TEMPLATES
        .iter()
        .find(|(title, _)| *title == job_title)
        .map(|(_, body)| *body)
}

/// Prompts for one submission's worth of fields on stdin. Returns `Ok(None)`
/// when the operator quits (`q`) or stdin is closed.
pub fn read_interactive() -> io::Result<Option<JobFormInput>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    let title_line = match prompt_line(
        &mut lines,
        &format!("岗位名称 [{DEFAULT_JOB_TITLE}] (q 退出): "),
    )? {
        Some(line) => line,
        None => return Ok(None),
    };
    if title_line == "q" {
        return Ok(None);
    }
    let job_title = if title_line.is_empty() {
        DEFAULT_JOB_TITLE.to_string()
    } else {
        title_line
    };

    println!("详细岗位要求，逐行输入，空行结束（直接空行则套用预设模板）:");
    let mut requirement_lines = Vec::new();
    loop {
        match prompt_line(&mut lines, "> ")? {
            Some(line) if !line.is_empty() => requirement_lines.push(line),
            _ => break,
        }
    }
    let requirements = if requirement_lines.is_empty() {
        template_for(&job_title).unwrap_or_default().to_string()
    } else {
        requirement_lines.join("\n")
    };

    let top_n = match prompt_line(
        &mut lines,
        &format!("返回候选人数量 [{DEFAULT_TOP_N}]: "),
    )? {
        Some(line) if !line.is_empty() => line.parse().unwrap_or(DEFAULT_TOP_N),
        Some(_) => DEFAULT_TOP_N,
        None => return Ok(None),
    };

    Ok(Some(JobFormInput {
        job_title,
        requirements,
        top_n,
    }))
}

/// Blocks until the operator acknowledges a surfaced failure.
pub fn wait_for_ack() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();
    prompt_line(&mut lines, "按回车键确认: ")?;
    Ok(())
}

/// Reads one trimmed line after printing `prompt`. `None` on EOF.
fn prompt_line(reader: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
